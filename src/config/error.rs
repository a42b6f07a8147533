//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("Retry count must be at most {0}")]
    TooManyRetries(u32),

    #[error("Question cap must be between 1 and 10")]
    InvalidQuestionCap,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Synthesis token bound must be between 1 and 2048")]
    InvalidTokenBound,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("A Gemini API key is required in production")]
    ApiKeyRequiredInProduction,
}
