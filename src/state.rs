use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::{TokenError, TokenService};
use crate::config::AppConfig;
use crate::database::{self, DatabaseError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Token service: {0}")]
    Token(#[from] TokenError),

    #[error("Database: {0}")]
    Database(#[from] DatabaseError),
}

/// Shared application state, built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub pool: PgPool,
}

impl AppState {
    /// Must be called inside a Tokio runtime; the pool is created lazily.
    pub fn new(config: AppConfig) -> Result<Self, StartupError> {
        let tokens = TokenService::from_config(&config.security)?;
        let pool = database::connect_lazy(&config.database)?;

        Ok(Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            pool,
        })
    }

    pub fn debug_mode(&self) -> bool {
        self.config.security.debug_mode
    }
}
