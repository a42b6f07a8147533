//! Mock image generator.
//!
//! Stands in for the real generator when no API key is configured and in
//! tests. Answers with a fixed placeholder image unless a failure has been
//! queued, and records every prompt it was given.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{ImageGenerationResult, ImageGenerator};

pub const MOCK_IMAGE_URL: &str = "https://placehold.co/1024x1024/png?text=Mock+Image+Generation";
pub const MOCK_JOB_ID: &str = "mock-job-id";

#[derive(Debug, Clone, Default)]
pub struct MockImageGenerator {
    /// Failure reasons to report, consumed front to back.
    failures: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next unqueued call report a failure.
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.failures.lock().unwrap().push_back(reason.into());
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str) -> ImageGenerationResult {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match self.failures.lock().unwrap().pop_front() {
            Some(reason) => ImageGenerationResult::failed(MOCK_JOB_ID, reason),
            None => ImageGenerationResult::succeeded(MOCK_JOB_ID, MOCK_IMAGE_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poster::GenerationStatus;

    #[tokio::test]
    async fn returns_placeholder_and_records_prompt() {
        let generator = MockImageGenerator::new();

        let result = generator.generate("Marketing poster, bold").await;

        assert_eq!(result.status, GenerationStatus::Succeeded);
        assert_eq!(result.image_ref.as_deref(), Some(MOCK_IMAGE_URL));
        assert_eq!(result.job_id, MOCK_JOB_ID);
        assert_eq!(generator.prompts(), vec!["Marketing poster, bold".to_string()]);
    }

    #[tokio::test]
    async fn queued_failure_is_reported_once() {
        let generator = MockImageGenerator::new().with_failure("quota exceeded");

        let first = generator.generate("a").await;
        let second = generator.generate("b").await;

        assert_eq!(first.status, GenerationStatus::Failed);
        assert_eq!(first.failure_reason.as_deref(), Some("quota exceeded"));
        assert_eq!(second.status, GenerationStatus::Succeeded);
        assert_eq!(generator.call_count(), 2);
    }
}
