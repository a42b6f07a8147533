//! Gemini image generator - text-to-image through `generateContent` on an
//! image-capable Gemini model.
//!
//! Inline image parts come back base64 encoded and are returned as `data:`
//! URLs. Every failure is folded into a failed `ImageGenerationResult`
//! carrying a placeholder that names the error.

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::adapters::ai::DEFAULT_GEMINI_BASE_URL;
use crate::ports::{ImageGenerationResult, ImageGenerator, FAILED_IMAGE_PLACEHOLDER};

pub const DEFAULT_GEMINI_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Returned when the model answered without any image part.
pub const IMAGE_NOT_FOUND_PLACEHOLDER: &str =
    "https://placehold.co/1024x1024/667/fff?text=Image+Generated+(Base64+not+found)";

const ERROR_JOB_ID: &str = "error-job-id";

#[derive(Debug, Clone)]
pub struct GeminiImageConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiImageConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct GeminiImageGenerator {
    config: GeminiImageConfig,
    client: Client,
}

impl GeminiImageGenerator {
    pub fn new(config: GeminiImageConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn request_image(&self, prompt: &str) -> Result<ImageResponse, String> {
        let body = ImageRequest {
            contents: vec![ImageContent {
                role: Some("user".to_string()),
                parts: vec![ImagePart {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("status {}: {}", status.as_u16(), text));
        }

        response.json().await.map_err(|e| e.to_string())
    }
}

/// First usable image reference in the reply: an inline image as a
/// `data:` URL, or a text part holding an http(s) URL.
fn image_ref_from(response: ImageResponse) -> Option<String> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default();

    parts.into_iter().find_map(|part| {
        if let Some(data) = part.inline_data.filter(|d| !d.data.is_empty()) {
            let mime = data.mime_type.as_deref().unwrap_or("image/png");
            return Some(format!("data:{};base64,{}", mime, data.data));
        }
        part.text
            .map(|t| t.trim().to_string())
            .filter(|t| t.starts_with("http"))
    })
}

/// Placeholder naming the failure, e.g. `...?text=Generation+Failed:+quota`.
pub fn failure_placeholder(reason: &str) -> String {
    Url::parse_with_params(
        "https://placehold.co/1024x1024/e74c3c/fff",
        &[("text", format!("Generation Failed: {}", reason))],
    )
    .map(String::from)
    .unwrap_or_else(|_| FAILED_IMAGE_PLACEHOLDER.to_string())
}

#[async_trait]
impl ImageGenerator for GeminiImageGenerator {
    async fn generate(&self, prompt: &str) -> ImageGenerationResult {
        info!(model = %self.config.model, "Generating poster image");

        match self.request_image(prompt).await {
            Ok(response) => {
                let job_id = format!("genai-{}", Uuid::new_v4());
                match image_ref_from(response) {
                    Some(image_ref) => ImageGenerationResult::succeeded(job_id, image_ref),
                    None => {
                        warn!("No image data in generation response, using placeholder");
                        ImageGenerationResult::succeeded(job_id, IMAGE_NOT_FOUND_PLACEHOLDER)
                    }
                }
            }
            Err(reason) => {
                warn!(error = %reason, "Image generation failed");
                let placeholder = failure_placeholder(&reason);
                ImageGenerationResult::failed(ERROR_JOB_ID, reason).with_image_ref(placeholder)
            }
        }
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<ImageContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ImageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ImagePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    candidates: Vec<ImageCandidate>,
}

#[derive(Debug, Deserialize)]
struct ImageCandidate {
    content: Option<ImageContent>,
}
