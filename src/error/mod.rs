use error_stack::{Context, Report};
use serde::ser::SerializeStruct;
use std::borrow::Cow;
use thiserror::Error;
use tracing_error::SpanTrace;

mod impls;

/// What went wrong, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The input was rejected or an e-mail lookup came back empty.
    ValidationFailed,
    /// Nothing exists under the requested id.
    NotFound,
    /// The store or anything underneath it failed.
    Internal,
}

impl ErrorCategory {
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::ValidationFailed => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error)]
#[error("caused by")]
pub struct ErrorCause;

pub struct Error {
    category: ErrorCategory,
    message: Cow<'static, str>,
    report: Option<Report<ErrorCause>>,
    trace: SpanTrace,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    const INTERNAL_MESSAGE: &'static str = "Unexpected error has occurred. Please try again later.";

    #[must_use]
    pub fn new(category: ErrorCategory, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            category,
            message: message.into(),
            report: None,
            trace: SpanTrace::capture(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCategory::ValidationFailed, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCategory::NotFound, message)
    }

    #[must_use]
    pub fn from_report(category: ErrorCategory, report: Report<impl Context>) -> Self {
        let message = match category {
            ErrorCategory::Internal => Cow::Borrowed(Self::INTERNAL_MESSAGE),
            _ => Cow::Owned(report.current_context().to_string()),
        };

        Self {
            category,
            message,
            report: Some(report.change_context(ErrorCause)),
            trace: SpanTrace::capture(),
        }
    }

    #[must_use]
    pub fn internal(report: Report<impl Context>) -> Self {
        Self::from_report(ErrorCategory::Internal, report)
    }
}

impl Error {
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.category.status_code()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn report(&self) -> Option<&Report<ErrorCause>> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn trace(&self) -> &SpanTrace {
        &self.trace
    }

    #[must_use]
    pub fn downcast_ref<F: Context>(&self) -> Option<&F> {
        self.report.as_ref().and_then(|v| v.downcast_ref::<F>())
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("category", &self.category)
            .field("message", &self.message)
            .field("report", &self.report)
            .field("trace", &self.trace)
            .finish()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.category, self.message)?;
        if let Some(report) = self.report.as_ref() {
            write!(f, "\n{report:?}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

// Only what callers are allowed to see, the report stays in the logs.
impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Error", 3)?;
        state.serialize_field("code", self.category.code())?;
        state.serialize_field("status", &self.category.status_code())?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}
