//! Image Generator Adapters.
//!
//! - `GeminiImageGenerator` - Gemini image model over HTTP
//! - `MockImageGenerator` - fixed placeholder, used without an API key and in tests

mod gemini_image_generator;
mod mock_image_generator;

pub use gemini_image_generator::{
    failure_placeholder, GeminiImageConfig, GeminiImageGenerator, DEFAULT_GEMINI_IMAGE_MODEL,
    IMAGE_NOT_FOUND_PLACEHOLDER,
};
pub use mock_image_generator::{MockImageGenerator, MOCK_IMAGE_URL, MOCK_JOB_ID};
