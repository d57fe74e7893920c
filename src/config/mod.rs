use thiserror::Error;

mod database;
mod logging;
mod server;

pub use self::database::{Database, DbPoolConfig};
pub use self::logging::{InvalidLoggingStyle, Logging, LoggingStyle};
pub use self::server::Server;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;
