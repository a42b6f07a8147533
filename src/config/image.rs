//! Image model configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::image::{GeminiImageConfig, DEFAULT_GEMINI_IMAGE_MODEL};

use super::error::ValidationError;

/// Image generation settings. Shares the Gemini key and base URL with
/// [`super::AiConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ImageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn gemini(&self, api_key: &str, base_url: &str) -> GeminiImageConfig {
        GeminiImageConfig::new(api_key)
            .with_model(&self.model)
            .with_base_url(base_url)
            .with_timeout(self.timeout())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("IMAGE__MODEL"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout("image"));
        }
        Ok(())
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_IMAGE_MODEL.to_string()
}

fn default_timeout() -> u64 {
    120
}
