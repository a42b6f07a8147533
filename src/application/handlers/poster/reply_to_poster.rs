//! ReplyToPosterHandler - one gathering turn of a poster conversation.
//!
//! The turn works on a copy of the stored session and writes it back once
//! at the end, so any failure leaves the stored session exactly as it was.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::PosterConversationEngine;
use crate::domain::foundation::{CommandMetadata, PosterSessionId};
use crate::domain::poster::{ImageVersion, PosterError, PosterSession};
use crate::ports::{AIProvider, BrandContextProvider, ImageGenerator, PosterSessionRepository};

use super::support::{load_brand, load_owned_session, request_metadata, require_text};
use super::SessionTurnLocks;

/// Command carrying the user's answer to the last question.
#[derive(Debug, Clone)]
pub struct ReplyToPosterCommand {
    pub session_id: PosterSessionId,
    pub message: String,
}

/// What the turn produced.
#[derive(Debug, Clone)]
pub enum ReplyOutcome {
    /// Still gathering; show this question next.
    NextQuestion(String),
    /// Ready; the first image was generated.
    Generated(ImageVersion),
}

#[derive(Debug, Clone)]
pub struct ReplyToPosterResult {
    pub session: PosterSession,
    pub outcome: ReplyOutcome,
}

pub struct ReplyToPosterHandler<P: ?Sized + AIProvider> {
    engine: Arc<PosterConversationEngine<P>>,
    brands: Arc<dyn BrandContextProvider>,
    images: Arc<dyn ImageGenerator>,
    repository: Arc<dyn PosterSessionRepository>,
    locks: SessionTurnLocks,
}

impl<P: ?Sized + AIProvider> ReplyToPosterHandler<P> {
    pub fn new(
        engine: Arc<PosterConversationEngine<P>>,
        brands: Arc<dyn BrandContextProvider>,
        images: Arc<dyn ImageGenerator>,
        repository: Arc<dyn PosterSessionRepository>,
        locks: SessionTurnLocks,
    ) -> Self {
        Self {
            engine,
            brands,
            images,
            repository,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReplyToPosterCommand,
        metadata: CommandMetadata,
    ) -> Result<ReplyToPosterResult, PosterError> {
        require_text("reply", &cmd.message)?;
        let _turn = self.locks.acquire(cmd.session_id).await;

        // 1. Load, authorize, and check stage
        let mut session =
            load_owned_session(self.repository.as_ref(), &cmd.session_id, &metadata.user_id)
                .await?;
        session.ensure_gathering()?;
        let brand =
            load_brand(self.brands.as_ref(), session.brand_kit_id(), &metadata.user_id).await?;

        // 2. Decide readiness against the history including this reply
        session.record_user_reply(cmd.message)?;
        let outcome = self
            .engine
            .refine(
                &brand,
                session.conversation_history(),
                session.gathered_info(),
                request_metadata(&metadata, cmd.session_id, *session.brand_kit_id()),
            )
            .await?;

        // 3. Either ask again or generate the first image
        let reply = match (outcome.refined_prompt, outcome.next_question) {
            (Some(prompt), _) => {
                let generated = self.images.generate(&prompt).await;
                if let Some(reason) = &generated.failure_reason {
                    warn!(session_id = %cmd.session_id, reason = %reason, "First image failed");
                }
                let version = generated.into_version(prompt.clone());
                session.complete_with_first_image(outcome.updated_info, prompt, version.clone())?;
                ReplyOutcome::Generated(version)
            }
            (None, Some(question)) => {
                session.record_question(question.clone(), outcome.updated_info)?;
                ReplyOutcome::NextQuestion(question)
            }
            (None, None) => {
                return Err(PosterError::malformed("turn produced neither a question nor a prompt"))
            }
        };

        // 4. Persist once
        self.repository.update(&session).await?;

        info!(
            session_id = %cmd.session_id,
            stage = %session.stage(),
            questions_asked = session.questions_asked(),
            "Poster reply processed"
        );

        Ok(ReplyToPosterResult {
            session,
            outcome: reply,
        })
    }
}
