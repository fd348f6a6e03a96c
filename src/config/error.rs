//! Configuration error types

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised by semantic validation of loaded configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    #[error("database path must not be empty")]
    EmptyDatabasePath,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}
