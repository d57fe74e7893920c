use error_stack::Report;
use validator::ValidateError;

use super::{Error, ErrorCategory};
use crate::store::StoreError;

impl From<Report<StoreError>> for Error {
    fn from(value: Report<StoreError>) -> Self {
        tracing::error!(report = ?value, "Caught user store error");
        Error::internal(value)
    }
}

impl From<ValidateError> for Error {
    fn from(value: ValidateError) -> Self {
        let message = value
            .first_message()
            .map_or_else(|| value.to_string(), ToString::to_string);

        Error::new(ErrorCategory::ValidationFailed, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validate_error() {
        let error = Error::from(ValidateError::field("email", "Email is invalid"));
        assert_eq!(error.category(), ErrorCategory::ValidationFailed);
        assert_eq!(error.message(), "Email is invalid");
    }

    #[test]
    fn should_convert_store_error() {
        let error = Error::from(Report::new(StoreError));
        assert_eq!(error.category(), ErrorCategory::Internal);
        assert!(error.downcast_ref::<StoreError>().is_some());
    }
}
