//! Generated image versions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Outcome of the generation that produced a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Succeeded,
    /// The image URL points at a placeholder describing the failure.
    Failed,
}

/// One entry of a session's append-only image chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVersion {
    pub image_url: String,
    pub prompt: String,
    pub status: GenerationStatus,
    /// Provider job identifier, when the generator reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub created_at: Timestamp,
}

impl ImageVersion {
    pub fn new(image_url: impl Into<String>, prompt: impl Into<String>, status: GenerationStatus) -> Self {
        Self {
            image_url: image_url.into(),
            prompt: prompt.into(),
            status,
            job_id: None,
            created_at: Timestamp::now(),
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn is_failed(&self) -> bool {
        self.status == GenerationStatus::Failed
    }
}
