//! Image Generator Port - Interface for poster image generation.
//!
//! Generation failures are data, not errors: a failed attempt still yields a
//! result carrying a placeholder reference, so the session records a
//! visible, inspectable version instead of aborting the turn.

use async_trait::async_trait;

use crate::domain::poster::{GenerationStatus, ImageVersion};

/// Shown when a generator reports failure without any image reference.
pub const FAILED_IMAGE_PLACEHOLDER: &str =
    "https://placehold.co/1024x1024/e74c3c/fff?text=Generation+Failed";

/// Port for text-to-image generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates one image for the prompt. Never fails; provider errors are
    /// reported through `ImageGenerationResult::status`.
    async fn generate(&self, prompt: &str) -> ImageGenerationResult;
}

/// Outcome of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerationResult {
    /// Provider job identifier.
    pub job_id: String,
    pub status: GenerationStatus,
    /// URL or `data:` URL of the image (or of a placeholder).
    pub image_ref: Option<String>,
    /// Provider error message for failed attempts.
    pub failure_reason: Option<String>,
}

impl ImageGenerationResult {
    pub fn succeeded(job_id: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: GenerationStatus::Succeeded,
            image_ref: Some(image_ref.into()),
            failure_reason: None,
        }
    }

    pub fn failed(job_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: GenerationStatus::Failed,
            image_ref: None,
            failure_reason: Some(reason.into()),
        }
    }

    /// Attaches a placeholder reference to a failed result.
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Returns the image reference, substituting the failure placeholder.
    /// A result without a usable reference always counts as failed.
    pub fn resolved(&self) -> (String, GenerationStatus) {
        match self.image_ref.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            Some(image_ref) => (image_ref.to_string(), self.status),
            None => (FAILED_IMAGE_PLACEHOLDER.to_string(), GenerationStatus::Failed),
        }
    }

    /// Builds the version entry recording this attempt.
    pub fn into_version(self, prompt: impl Into<String>) -> ImageVersion {
        let (image_url, status) = self.resolved();
        ImageVersion::new(image_url, prompt, status).with_job_id(self.job_id)
    }
}
