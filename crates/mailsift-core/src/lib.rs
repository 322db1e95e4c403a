pub mod app_config;
pub mod config;
pub mod record;
pub mod target;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::load_app_config;
pub use record::ScrapeRecord;
pub use target::Target;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
