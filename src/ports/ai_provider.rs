//! AI Provider Port - Interface for text-completion providers.
//!
//! This port abstracts every call the poster engine makes to a generative
//! text model, so the conversation logic never couples to a vendor API.
//!
//! # Design
//!
//! - Non-streaming completions only; each engine step needs the full reply
//! - Provider-agnostic message format
//! - Optional JSON response mode for structured replies
//! - `AIProviderExt::complete_json` parses replies into typed values and
//!   separates transport failures from malformed output
//!
//! # Example
//!
//! ```ignore
//! let reply: RefineReply = provider
//!     .complete_json(
//!         CompletionRequest::new(metadata)
//!             .with_system_prompt(system)
//!             .with_message(MessageRole::User, "Analyze conversation and update info")
//!             .with_temperature(0.2)
//!             .with_json_response(),
//!     )
//!     .await?;
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{BrandKitId, PosterSessionId, UserId};
use crate::domain::poster::{extract_json, ExtractionError};

/// Port for text-completion provider interactions.
///
/// Implementations connect to an external model service and translate
/// between its API and these request/response types.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Get provider information (name, model, capabilities).
    fn provider_info(&self) -> ProviderInfo;
}

/// Shape the provider is asked to answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

/// Request for AI completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// System prompt to guide model behavior.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness (0.0 = deterministic, 1.0+ = creative).
    pub temperature: Option<f32>,
    pub response_format: ResponseFormat,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates a new completion request with required metadata.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            response_format: ResponseFormat::Text,
            metadata,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Asks the provider for a JSON reply.
    pub fn with_json_response(mut self) -> Self {
        self.response_format = ResponseFormat::Json;
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Request metadata for tracing.
#[derive(Debug, Clone, Default)]
pub struct RequestMetadata {
    /// User the request is made on behalf of.
    pub user_id: Option<UserId>,
    /// Poster session the request belongs to, once one exists.
    pub session_id: Option<PosterSessionId>,
    /// Brand kit flavoring the request.
    pub brand_kit_id: Option<BrandKitId>,
    /// Trace ID for distributed tracing.
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_session(mut self, session_id: PosterSessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_brand_kit(mut self, brand_kit_id: BrandKitId) -> Self {
        self.brand_kit_id = Some(brand_kit_id);
        self
    }
}

/// Response from AI completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    Error,
}

/// Provider information and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,
    /// Whether the provider honors `ResponseFormat::Json` natively.
    pub supports_json_mode: bool,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            supports_json_mode: false,
        }
    }

    pub fn with_json_mode(mut self, supports: bool) -> Self {
        self.supports_json_mode = supports;
        self
    }
}

/// AI provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider's envelope (not the model text).
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}

/// Failure of a typed completion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error(transparent)]
    Provider(#[from] AIError),

    /// The provider answered, but not with JSON of the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<ExtractionError> for CompletionError {
    fn from(err: ExtractionError) -> Self {
        CompletionError::MalformedResponse(err.to_string())
    }
}

/// Typed helpers over any `AIProvider`.
#[async_trait]
pub trait AIProviderExt: AIProvider {
    /// Completes and returns the raw reply text.
    async fn complete_text(&self, request: CompletionRequest) -> Result<String, AIError> {
        Ok(self.complete(request).await?.content)
    }

    /// Completes in JSON mode and deserializes the reply into `T`,
    /// tolerating fenced or prose-wrapped JSON.
    async fn complete_json<T>(&self, request: CompletionRequest) -> Result<T, CompletionError>
    where
        T: DeserializeOwned + Send,
    {
        let response = self.complete(request.with_json_response()).await?;
        Ok(extract_json(&response.content)?)
    }
}

impl<P: AIProvider + ?Sized> AIProviderExt for P {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_metadata() -> RequestMetadata {
        RequestMetadata::new("trace-123")
            .with_user(UserId::new("test-user").unwrap())
            .with_session(PosterSessionId::new())
    }

    struct Canned(&'static str);

    #[async_trait]
    impl AIProvider for Canned {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
            assert_eq!(request.response_format, ResponseFormat::Json);
            Ok(CompletionResponse {
                content: self.0.to_string(),
                usage: TokenUsage::zero(),
                model: "canned".to_string(),
                finish_reason: FinishReason::Stop,
            })
        }

        fn provider_info(&self) -> ProviderInfo {
            ProviderInfo::new("canned", "canned")
        }
    }

    #[derive(Debug, Deserialize)]
    struct Ready {
        #[serde(rename = "isReady")]
        is_ready: bool,
    }

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new(test_metadata())
            .with_message(MessageRole::User, "Hello")
            .with_system_prompt("Be helpful")
            .with_max_tokens(300)
            .with_temperature(0.5)
            .with_json_response();

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.system_prompt, Some("Be helpful".to_string()));
        assert_eq!(request.max_tokens, Some(300));
        assert_eq!(request.temperature, Some(0.5));
        assert_eq!(request.response_format, ResponseFormat::Json);
        assert_eq!(request.metadata.trace_id, "trace-123");
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn ai_error_retryable_classification() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::unavailable("down").is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::timeout(30).is_retryable());

        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::content_filtered("bad").is_retryable());
        assert!(!AIError::parse("bad envelope").is_retryable());
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(AIError::rate_limited(30).to_string(), "rate limited: retry after 30s");
        assert_eq!(AIError::timeout(30).to_string(), "request timed out after 30s");
    }

    #[tokio::test]
    async fn complete_json_parses_fenced_reply() {
        let provider = Canned("```json\n{\"isReady\": true}\n```");
        let reply: Ready = provider
            .complete_json(CompletionRequest::new(test_metadata()))
            .await
            .unwrap();
        assert!(reply.is_ready);
    }

    #[tokio::test]
    async fn complete_json_reports_non_json_as_malformed() {
        let provider = Canned("Sorry, I cannot help with that.");
        let result: Result<Ready, _> = provider
            .complete_json(CompletionRequest::new(test_metadata()))
            .await;
        assert!(matches!(result, Err(CompletionError::MalformedResponse(_))));
    }

    #[test]
    fn provider_is_object_safe() {
        fn _accepts(_: &dyn AIProvider) {}
    }
}
