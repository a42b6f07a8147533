//! Poster conversation tuning

use serde::Deserialize;
use std::time::Duration;

use crate::application::PosterEngineConfig;

use super::error::ValidationError;

/// Bounds of the poster conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct PosterConfig {
    /// Clarification questions before generation is forced
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,

    /// Upper bound on each model call of a turn, in seconds
    #[serde(default = "default_completion_timeout")]
    pub completion_timeout_secs: u64,

    #[serde(default = "default_synthesis_temperature")]
    pub synthesis_temperature: f32,

    #[serde(default = "default_synthesis_max_tokens")]
    pub synthesis_max_tokens: u32,
}

impl PosterConfig {
    pub fn engine_config(&self) -> PosterEngineConfig {
        PosterEngineConfig {
            max_questions: self.max_questions,
            completion_timeout: Duration::from_secs(self.completion_timeout_secs),
            synthesis_temperature: self.synthesis_temperature,
            synthesis_max_tokens: self.synthesis_max_tokens,
            ..PosterEngineConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=10).contains(&self.max_questions) {
            return Err(ValidationError::InvalidQuestionCap);
        }
        if self.completion_timeout_secs == 0 || self.completion_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("poster completion"));
        }
        if !(0.0..=2.0).contains(&self.synthesis_temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.synthesis_max_tokens == 0 || self.synthesis_max_tokens > 2048 {
            return Err(ValidationError::InvalidTokenBound);
        }
        Ok(())
    }
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            max_questions: default_max_questions(),
            completion_timeout_secs: default_completion_timeout(),
            synthesis_temperature: default_synthesis_temperature(),
            synthesis_max_tokens: default_synthesis_max_tokens(),
        }
    }
}

fn default_max_questions() -> usize {
    3
}

fn default_completion_timeout() -> u64 {
    30
}

fn default_synthesis_temperature() -> f32 {
    0.5
}

fn default_synthesis_max_tokens() -> u32 {
    300
}
