//! Poster-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{AIError, CompletionError};

/// Errors surfaced by the poster conversation engine and its handlers.
///
/// Any of these leaves the stored session exactly as it was before the turn.
#[derive(Debug, Clone, Error)]
pub enum PosterError {
    /// The completion provider was unreachable, rejected the call, or timed out.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    /// The provider answered with text that does not fit the expected shape.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// A required entity was not found or an input was invalid.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation is not allowed in the session's current stage.
    #[error("invalid state: {0}")]
    State(String),

    #[error("permission denied")]
    Forbidden,

    #[error("storage error: {0}")]
    Storage(String),
}

impl PosterError {
    pub fn malformed(message: impl Into<String>) -> Self {
        PosterError::MalformedResponse(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PosterError::Validation(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        PosterError::State(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        PosterError::Storage(message.into())
    }

    /// Returns true if the same turn may succeed when retried unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            PosterError::Provider(err) => err.is_retryable(),
            PosterError::MalformedResponse(_) => true,
            _ => false,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PosterError::Provider(AIError::RateLimited { .. }) => ErrorCode::RateLimited,
            PosterError::Provider(_) => ErrorCode::AIProviderError,
            PosterError::MalformedResponse(_) => ErrorCode::MalformedResponse,
            PosterError::Validation(_) => ErrorCode::ValidationFailed,
            PosterError::State(_) => ErrorCode::InvalidStateTransition,
            PosterError::Forbidden => ErrorCode::Forbidden,
            PosterError::Storage(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<CompletionError> for PosterError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Provider(e) => PosterError::Provider(e),
            CompletionError::MalformedResponse(msg) => PosterError::MalformedResponse(msg),
        }
    }
}

impl From<ValidationError> for PosterError {
    fn from(err: ValidationError) -> Self {
        PosterError::Validation(err.to_string())
    }
}

impl From<DomainError> for PosterError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound
            | ErrorCode::BrandKitNotFound
            | ErrorCode::ImageVersionNotFound
            | ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => PosterError::Validation(err.message),
            ErrorCode::Forbidden => PosterError::Forbidden,
            ErrorCode::InvalidStateTransition => PosterError::State(err.message),
            _ => PosterError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_maps_to_rate_limited_code() {
        let err = PosterError::from(AIError::rate_limited(5));
        assert_eq!(err.code(), ErrorCode::RateLimited);
        assert!(err.is_retryable());
    }

    #[test]
    fn malformed_completion_maps_to_malformed_response() {
        let err = PosterError::from(CompletionError::MalformedResponse("not json".into()));
        assert!(matches!(err, PosterError::MalformedResponse(_)));
        assert_eq!(err.code(), ErrorCode::MalformedResponse);
    }

    #[test]
    fn missing_session_is_a_validation_error() {
        let err = PosterError::from(DomainError::new(ErrorCode::SessionNotFound, "gone"));
        assert!(matches!(err, PosterError::Validation(ref m) if m == "gone"));
    }

    #[test]
    fn database_failure_is_a_storage_error() {
        let err = PosterError::from(DomainError::new(ErrorCode::DatabaseError, "disk full"));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(!err.is_retryable());
    }

    #[test]
    fn state_error_displays_reason() {
        let err = PosterError::state("no image yet");
        assert_eq!(err.to_string(), "invalid state: no image yet");
    }
}
