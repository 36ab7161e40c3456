//! RealTour backend: listing search/find/update and user actions over
//! PostgreSQL, with mail/SMS notification dispatch.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod notify;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod validate;

pub use config::{AppConfig, NotifyConfig};
pub use error::{AppError, ConfigError};
pub use routes::app;
pub use state::AppState;
