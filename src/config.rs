//! Application configuration, loaded once at startup and injected everywhere.

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub notify: NotifyConfig,
}

/// Provider settings for the notification dispatcher. Dispatch is off unless
/// `NOTIFY_ENABLED` is set; credentials are only required when it is.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub sendgrid_api_key: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub from_email: String,
    pub from_phone: String,
    pub site_url: String,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FROM_EMAIL: &str = "realtourservice@gmail.com";
const DEFAULT_FROM_PHONE: &str = "5412348687";
const DEFAULT_SITE_URL: &str = "https://realtournetwork.com";

fn var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let enabled = matches!(
            std::env::var("NOTIFY_ENABLED").as_deref(),
            Ok("1") | Ok("true")
        );
        let notify = NotifyConfig {
            enabled,
            sendgrid_api_key: if enabled {
                var("SENDGRID_API_KEY")?
            } else {
                var_or("SENDGRID_API_KEY", "")
            },
            twilio_account_sid: if enabled {
                var("TWILIO_ACCOUNT_SID")?
            } else {
                var_or("TWILIO_ACCOUNT_SID", "")
            },
            twilio_auth_token: if enabled {
                var("TWILIO_AUTH_TOKEN")?
            } else {
                var_or("TWILIO_AUTH_TOKEN", "")
            },
            from_email: var_or("FROM_EMAIL", DEFAULT_FROM_EMAIL),
            from_phone: var_or("FROM_PHONE", DEFAULT_FROM_PHONE),
            site_url: var_or("SITE_URL", DEFAULT_SITE_URL),
        };
        Ok(AppConfig {
            database_url: var("DATABASE_URL")?,
            bind_addr: var_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            notify,
        })
    }
}

impl NotifyConfig {
    /// Config for tests and for running with dispatch dormant.
    pub fn disabled() -> Self {
        NotifyConfig {
            enabled: false,
            sendgrid_api_key: String::new(),
            twilio_account_sid: String::new(),
            twilio_auth_token: String::new(),
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            from_phone: DEFAULT_FROM_PHONE.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}
