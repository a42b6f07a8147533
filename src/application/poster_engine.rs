//! PosterConversationEngine - the poster-design state machine's decisions.
//!
//! The engine owns every model call of a poster conversation: the opening
//! clarification, the per-turn readiness decision, edit interpretation, and
//! image prompt synthesis. It is stateless; handlers pass in the session
//! data they loaded and persist whatever the engine returns.
//!
//! Every completion is bounded by `PosterEngineConfig::completion_timeout`.
//! Only prompt synthesis degrades gracefully (to the deterministic builder);
//! every other provider or parse failure is surfaced so the turn is never
//! falsely advanced.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::brand::BrandContext;
use crate::domain::poster::prompts::{
    clean_model_prompt, fallback_poster_prompt, modify_system_prompt, prompt_engineering_input,
    refine_system_prompt, start_system_prompt, PROMPT_ENGINEER_SYSTEM_PROMPT,
};
use crate::domain::poster::{
    questions_asked, ConversationTurn, GatheredInfo, ModifyReply, PosterError, RefineReply,
    StartReply, StyleDefaults,
};
use crate::ports::{
    AIError, AIProvider, AIProviderExt, CompletionRequest, MessageRole, RequestMetadata,
};

/// Assistant turn recorded when the model gives no explanation for an edit.
pub const DEFAULT_EDIT_EXPLANATION: &str = "Updated your poster with the changes!";

/// User message accompanying the readiness system prompt.
const REFINE_INSTRUCTION: &str = "Analyze conversation and update info";

/// Tunables for the engine's model calls.
#[derive(Debug, Clone)]
pub struct PosterEngineConfig {
    /// Clarification questions allowed before generation is forced.
    pub max_questions: usize,
    /// Upper bound on each completion call.
    pub completion_timeout: Duration,
    pub start_temperature: f32,
    pub refine_temperature: f32,
    pub modify_temperature: f32,
    pub synthesis_temperature: f32,
    pub synthesis_max_tokens: u32,
}

impl Default for PosterEngineConfig {
    fn default() -> Self {
        Self {
            max_questions: 3,
            completion_timeout: Duration::from_secs(30),
            start_temperature: 0.3,
            refine_temperature: 0.2,
            modify_temperature: 0.3,
            synthesis_temperature: 0.5,
            synthesis_max_tokens: 300,
        }
    }
}

/// Result of the opening turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    pub questions: Vec<String>,
    pub gathered_info: GatheredInfo,
}

/// Result of a gathering turn.
///
/// Exactly one of `next_question` and `refined_prompt` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineOutcome {
    pub is_ready: bool,
    pub next_question: Option<String>,
    pub refined_prompt: Option<String>,
    pub updated_info: GatheredInfo,
}

/// Result of an edit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyOutcome {
    pub updated_prompt: String,
    pub updated_info: GatheredInfo,
    pub explanation: String,
}

/// Decides readiness, extracts requirements and synthesizes image prompts.
pub struct PosterConversationEngine<P: ?Sized + AIProvider> {
    ai_provider: Arc<P>,
    config: PosterEngineConfig,
}

impl<P: ?Sized + AIProvider> PosterConversationEngine<P> {
    pub fn new(ai_provider: Arc<P>) -> Self {
        Self {
            ai_provider,
            config: PosterEngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PosterEngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PosterEngineConfig {
        &self.config
    }

    /// Opening turn: follow-up questions plus whatever the description
    /// already reveals. Makes no readiness decision.
    pub async fn start_session(
        &self,
        brand: &BrandContext,
        user_description: &str,
        metadata: RequestMetadata,
    ) -> Result<StartOutcome, PosterError> {
        let request = CompletionRequest::new(metadata)
            .with_system_prompt(start_system_prompt(brand, user_description))
            .with_message(MessageRole::User, user_description)
            .with_temperature(self.config.start_temperature);

        let reply: StartReply = self.complete_json(request).await?;
        let questions = reply.clean_questions();

        debug!(
            brand = %brand.company_name(),
            questions = questions.len(),
            "Poster conversation opened"
        );

        Ok(StartOutcome {
            questions,
            gathered_info: reply.gathered_info,
        })
    }

    /// One gathering turn. `history` must already end with the user's reply.
    ///
    /// Ready when the question cap is reached, when `gathered_info` already
    /// has dimensions and a message, or when the model says so. When ready
    /// the image prompt is synthesized; otherwise the model's next question
    /// is returned and must be non-empty.
    pub async fn refine(
        &self,
        brand: &BrandContext,
        history: &[ConversationTurn],
        gathered_info: &GatheredInfo,
        metadata: RequestMetadata,
    ) -> Result<RefineOutcome, PosterError> {
        let asked = questions_asked(history);
        let force_generate = asked >= self.config.max_questions;
        let has_minimum_info = gathered_info.has_minimum_info();
        let defaults = StyleDefaults::for_message(gathered_info.message());

        let request = CompletionRequest::new(metadata.clone())
            .with_system_prompt(refine_system_prompt(
                brand,
                gathered_info,
                history,
                asked,
                self.config.max_questions,
            ))
            .with_message(MessageRole::User, REFINE_INSTRUCTION)
            .with_temperature(self.config.refine_temperature);

        let reply: RefineReply = self.complete_json(request).await?;

        let is_ready = force_generate || has_minimum_info || reply.is_ready;
        // Placeholder literals only once the info feeds synthesis
        let updated_info = if is_ready {
            gathered_info.resolved_with(&reply.updated_info, &defaults)
        } else {
            gathered_info.merged_with(&reply.updated_info)
        };

        debug!(
            questions_asked = asked,
            force_generate,
            has_minimum_info,
            model_ready = reply.is_ready,
            is_ready,
            "Readiness decided"
        );

        if is_ready {
            let refined_prompt = self.build_poster_prompt(brand, &updated_info, metadata).await;
            return Ok(RefineOutcome {
                is_ready,
                next_question: None,
                refined_prompt: Some(refined_prompt),
                updated_info,
            });
        }

        let next_question = reply.next_question().ok_or_else(|| {
            PosterError::malformed("model reported not ready without a next question")
        })?;

        Ok(RefineOutcome {
            is_ready,
            next_question: Some(next_question.to_string()),
            refined_prompt: None,
            updated_info,
        })
    }

    /// Interprets a free-text edit against the current design and
    /// synthesizes a fresh prompt from the updated info.
    pub async fn modify(
        &self,
        brand: &BrandContext,
        current_prompt: &str,
        current_info: &GatheredInfo,
        edit_request: &str,
        metadata: RequestMetadata,
    ) -> Result<ModifyOutcome, PosterError> {
        let request = CompletionRequest::new(metadata.clone())
            .with_system_prompt(modify_system_prompt(current_info, current_prompt, edit_request))
            .with_message(MessageRole::User, edit_request)
            .with_temperature(self.config.modify_temperature);

        let reply: ModifyReply = self.complete_json(request).await?;

        let merged = current_info.merged_with(&reply.updated_info);
        let defaults = StyleDefaults::for_message(merged.message());
        let updated_info = merged.resolved_with(&GatheredInfo::default(), &defaults);

        let explanation = reply
            .explanation
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EDIT_EXPLANATION)
            .to_string();

        info!(explanation = %explanation, "Edit interpreted");

        let updated_prompt = self.build_poster_prompt(brand, &updated_info, metadata).await;

        Ok(ModifyOutcome {
            updated_prompt,
            updated_info,
            explanation,
        })
    }

    /// Single-line image prompt for the info. Model-assisted when possible,
    /// the deterministic builder on any failure or empty output. Never fails.
    pub async fn build_poster_prompt(
        &self,
        brand: &BrandContext,
        info: &GatheredInfo,
        metadata: RequestMetadata,
    ) -> String {
        let request = CompletionRequest::new(metadata)
            .with_system_prompt(PROMPT_ENGINEER_SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt_engineering_input(brand, info))
            .with_temperature(self.config.synthesis_temperature)
            .with_max_tokens(self.config.synthesis_max_tokens);

        match self.complete_text(request).await {
            Ok(raw) => match clean_model_prompt(&raw) {
                Some(prompt) => {
                    debug!(prompt = %prompt, "Poster prompt synthesized");
                    prompt
                }
                None => {
                    warn!("Prompt synthesis returned no usable line, using fallback builder");
                    fallback_poster_prompt(brand, info)
                }
            },
            Err(e) => {
                warn!(error = %e, "Prompt synthesis failed, using fallback builder");
                fallback_poster_prompt(brand, info)
            }
        }
    }

    async fn complete_json<T>(&self, request: CompletionRequest) -> Result<T, PosterError>
    where
        T: DeserializeOwned + Send,
    {
        let call = self.ai_provider.complete_json::<T>(request);
        match tokio::time::timeout(self.config.completion_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(self.timeout_error().into()),
        }
    }

    async fn complete_text(&self, request: CompletionRequest) -> Result<String, AIError> {
        let call = self.ai_provider.complete_text(request);
        tokio::time::timeout(self.config.completion_timeout, call)
            .await
            .map_err(|_| self.timeout_error())?
    }

    fn timeout_error(&self) -> AIError {
        let secs = self.config.completion_timeout.as_secs().max(1);
        AIError::timeout(u32::try_from(secs).unwrap_or(u32::MAX))
    }
}
