//! Text model configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::adapters::ai::{GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_TEXT_MODEL};

use super::error::ValidationError;

/// Upper bound on `max_retries`.
pub const MAX_RETRIES: u32 = 10;

/// Gemini text model configuration.
///
/// Without an API key the application runs against scripted offline
/// providers.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key (`GOOGLE_API_KEY` is accepted as a fallback)
    pub gemini_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub text_model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_gemini(&self) -> bool {
        self.api_key().is_some()
    }

    /// The trimmed key, if a non-blank one is configured.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .filter(|k| !k.is_empty())
    }

    /// Provider configuration, if a key is present.
    pub fn gemini(&self) -> Option<GeminiConfig> {
        self.api_key().map(|key| {
            GeminiConfig::new(key)
                .with_model(&self.text_model)
                .with_base_url(&self.base_url)
                .with_timeout(self.timeout())
                .with_max_retries(self.max_retries)
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text_model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__TEXT_MODEL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("ai"));
        }
        if self.max_retries > MAX_RETRIES {
            return Err(ValidationError::TooManyRetries(MAX_RETRIES));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            text_model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_TEXT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}
