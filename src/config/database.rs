use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Database {
    /// Pool every user store operation goes through.
    pub primary: DbPoolConfig,
    /// Requires all database connections to be encrypted with TLS.
    ///
    /// **Environment variables**:
    /// - `USERGRAPH_DB_ENFORCE_TLS`
    #[serde(default = "Database::default_enforce_tls")]
    pub enforce_tls: bool,
    /// How long to wait for a connection from the pool before
    /// giving up.
    ///
    /// **Environment variables**:
    /// - `USERGRAPH_DB_TIMEOUT_SECS`
    #[serde(default = "Database::default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
}

impl Database {
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    const fn default_enforce_tls() -> bool {
        true
    }

    const fn default_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
        }
    }
}

impl Validate for Database {
    fn validate(&self) -> Result<(), ValidateError> {
        ValidateError::field_builder()
            .insert("primary", self.primary.validate().err().unwrap_or_else(empty))
            .build()
            .into_result()
    }
}

/// Configuration for connecting to a Postgres database.
#[derive(Debug, Deserialize)]
pub struct DbPoolConfig {
    /// Minimum amount of idle connections kept around.
    ///
    /// **Environment variables**:
    /// - `USERGRAPH_DB_PRIMARY_MIN_IDLE`
    pub min_idle: Option<NonZeroU32>,
    /// Maximum amount of connections in the pool.
    ///
    /// **Environment variables**:
    /// - `USERGRAPH_DB_PRIMARY_POOL_SIZE`
    #[serde(default = "DbPoolConfig::default_pool_size")]
    pub pool_size: NonZeroU32,
    /// Connection URL of the Postgres database.
    ///
    /// **Environment variables**:
    /// - `USERGRAPH_DB_PRIMARY_URL` or `DATABASE_URL`
    pub url: Sensitive<String>,
}

impl DbPoolConfig {
    const DEFAULT_POOL_SIZE: u32 = 5;

    const fn default_pool_size() -> NonZeroU32 {
        match NonZeroU32::new(Self::DEFAULT_POOL_SIZE) {
            Some(n) => n,
            None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
        }
    }
}

impl Validate for DbPoolConfig {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut url = ValidateError::msg_builder();
        if !validator::extras::validate_url(self.url.as_str()) {
            url.insert("Invalid Postgres connection URL");
        }

        let mut min_idle = ValidateError::msg_builder();
        if self.min_idle.is_some_and(|n| n > self.pool_size) {
            min_idle.insert("Minimum idle connections cannot exceed the pool size");
        }

        ValidateError::field_builder()
            .insert("min_idle", min_idle.build())
            .insert("url", url.build())
            .build()
            .into_result()
    }
}

fn empty() -> ValidateError {
    ValidateError::msg_builder().build()
}
