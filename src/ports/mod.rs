//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text completion (with typed JSON helpers in `AIProviderExt`)
//! - `ImageGenerator` - text-to-image generation, failures reported as data
//! - `PosterSessionRepository` - whole-record session persistence
//! - `BrandContextProvider` - read-only brand kit lookup

mod ai_provider;
mod brand_context_provider;
mod image_generator;
mod poster_session_repository;

pub use ai_provider::{
    AIError, AIProvider, AIProviderExt, CompletionError, CompletionRequest, CompletionResponse,
    FinishReason, Message, MessageRole, ProviderInfo, RequestMetadata, ResponseFormat, TokenUsage,
};
pub use brand_context_provider::BrandContextProvider;
pub use image_generator::{ImageGenerationResult, ImageGenerator, FAILED_IMAGE_PLACEHOLDER};
pub use poster_session_repository::PosterSessionRepository;
