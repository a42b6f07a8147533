//! Application configuration module
//!
//! Typed configuration loaded from environment variables through the
//! `config` and `dotenvy` crates. Variables carry the `BRANDVIBE` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use brandvibe::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod image;
mod poster;
mod runtime;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use image::ImageConfig;
pub use poster::PosterConfig;
pub use runtime::{Environment, RuntimeConfig};

use serde::Deserialize;

/// Fallback variable for the Gemini key.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// offline configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment and log filter
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Gemini text model
    #[serde(default)]
    pub ai: AiConfig,

    /// Gemini image model
    #[serde(default)]
    pub image: ImageConfig,

    /// Conversation bounds
    #[serde(default)]
    pub poster: PosterConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `BRANDVIBE__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key`
    /// - `BRANDVIBE__POSTER__MAX_QUESTIONS=2` -> `poster.max_questions = 2`
    ///
    /// `GOOGLE_API_KEY` is used when no prefixed key is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(key) = std::env::var(GOOGLE_API_KEY_VAR) {
            builder = builder.set_default("ai.gemini_api_key", key)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("BRANDVIBE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any value is out of range, or if
    /// production runs without a Gemini key.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.image.validate()?;
        self.poster.validate()?;
        if self.is_production() && !self.ai.has_gemini() {
            return Err(ValidationError::ApiKeyRequiredInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}
