use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::config;

mod error;
pub use self::error::*;

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Connection pool to the primary Postgres database.
#[derive(Clone)]
pub struct Pool {
    pool: sqlx::PgPool,
}

impl Pool {
    /// Builds a lazily connected pool. An unreachable database is only
    /// logged here and surfaces again on first use.
    pub async fn new(global: &config::Database, primary: &config::DbPoolConfig) -> Result<Self> {
        let mut options = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(global.timeout_secs.get()))
            .max_connections(primary.pool_size.get());

        if let Some(min_idle) = primary.min_idle {
            options = options.min_connections(min_idle.get());
        }

        let mut connect = PgConnectOptions::from_str(primary.url.as_str())
            .change_context(Error::InvalidUrl)?;

        if global.enforce_tls {
            connect = connect.ssl_mode(PgSslMode::Require);
        }

        let pool = Self::from_pool(options.connect_lazy_with(connect));
        if let Err(error) = pool.wait_until_healthy().await {
            if !error.is_unhealthy() {
                return Err(error);
            }
            tracing::warn!(?error, "Database is not reachable yet, continuing anyway");
        }

        Ok(pool)
    }

    #[must_use]
    pub fn from_pool(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "db.connect", skip(self))]
    pub async fn get(&self) -> Result<PoolConnection> {
        self.pool.acquire().await.map_err(|e| self.acquire_error(e))
    }

    #[tracing::instrument(name = "db.transaction", skip(self))]
    pub async fn begin(&self) -> Result<sqlx::Transaction<'static, sqlx::Postgres>> {
        self.pool.begin().await.map_err(|e| self.acquire_error(e))
    }

    pub async fn wait_until_healthy(&self) -> Result<()> {
        self.get().await.map(drop)
    }

    #[tracing::instrument(name = "db.migrate", skip(self))]
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Performing database migrations... (this may take a while)");
        let now = Instant::now();

        MIGRATOR.run(&self.pool).await.change_context(Error::Migrate)?;

        let elapsed = now.elapsed();
        tracing::info!("Successfully performed database migrations! took {elapsed:.2?}");
        Ok(())
    }

    // a pool without a single open connection never reached the database
    fn acquire_error(&self, error: sqlx::Error) -> Report<Error> {
        if self.pool.size() == 0 {
            Report::new(error).change_context(Error::UnhealthyPool)
        } else {
            Report::new(Error::Internal(error))
        }
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}
