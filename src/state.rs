//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::notify::Notifier;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub notifier: Arc<Notifier>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let notifier = Arc::new(Notifier::new(&config.notify));
        AppState {
            pool,
            config: Arc::new(config),
            notifier,
        }
    }
}
