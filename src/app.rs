use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::config;
use crate::database;
use crate::services::UserDirectory;
use crate::store::PgUserStore;

#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub db: database::Pool,
    pub users: UserDirectory,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    #[tracing::instrument(skip_all)]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let db = database::Pool::new(&cfg.db, &cfg.db.primary)
            .await
            .change_context(AppError)?;

        let users = UserDirectory::new(PgUserStore::new(db.clone()));
        Ok(Self {
            config: Arc::new(cfg),
            db,
            users,
        })
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        self.db.migrate().await.change_context(AppError)
    }
}
