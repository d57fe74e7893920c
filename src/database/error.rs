use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
    /// The configured Postgres connection url could not be parsed.
    #[error("invalid connection url")]
    InvalidUrl,
    #[error("received a pool error: {0}")]
    Internal(sqlx::Error),
    /// The pool has no reliable connection to the database.
    #[error("unhealthy database pool")]
    UnhealthyPool,
    #[error("could not run database migrations")]
    Migrate,
}

pub type Result<T> = error_stack::Result<T, Error>;

/// Converts a raw [`sqlx`] result into a [database error](Error).
pub trait ErrorExt<T> {
    fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn into_db_error(self) -> Result<T> {
        self.map_err(|e| Report::new(Error::Internal(e)))
    }
}

pub trait ReportExt {
    fn is_unhealthy(&self) -> bool;
}

impl ReportExt for Report<Error> {
    fn is_unhealthy(&self) -> bool {
        matches!(self.current_context(), Error::UnhealthyPool)
    }
}
