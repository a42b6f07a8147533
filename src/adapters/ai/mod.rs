//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! - `MockAIProvider` - scripted replies for tests and offline runs
//! - `GeminiProvider` - Google Gemini text models

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_TEXT_MODEL,
};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
