#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod services;
pub mod store;
pub mod types;
pub mod util;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::app::App;
pub use self::error::{Error, ErrorCategory, Result};
pub use self::services::UserDirectory;
