//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - text completion providers (Gemini, mock)
//! - `image` - image generators (Gemini, mock)
//! - `storage` - in-memory session store and brand catalog

pub mod ai;
pub mod image;
pub mod storage;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider, MockError};
pub use image::{GeminiImageConfig, GeminiImageGenerator, MockImageGenerator};
pub use storage::{InMemoryBrandCatalog, InMemoryPosterSessionRepository};
