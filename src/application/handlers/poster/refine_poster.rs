//! RefinePosterHandler - applies a free-text edit to a generated poster.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::PosterConversationEngine;
use crate::domain::foundation::{CommandMetadata, PosterSessionId};
use crate::domain::poster::{ImageVersion, PosterError, PosterSession};
use crate::ports::{AIProvider, BrandContextProvider, ImageGenerator, PosterSessionRepository};

use super::support::{load_brand, load_owned_session, request_metadata, require_text};
use super::SessionTurnLocks;

/// Command carrying an edit request such as "make the text bigger".
#[derive(Debug, Clone)]
pub struct RefinePosterCommand {
    pub session_id: PosterSessionId,
    pub edit_request: String,
}

#[derive(Debug, Clone)]
pub struct RefinePosterResult {
    pub session: PosterSession,
    /// The version this edit appended.
    pub version: ImageVersion,
    pub explanation: String,
}

pub struct RefinePosterHandler<P: ?Sized + AIProvider> {
    engine: Arc<PosterConversationEngine<P>>,
    brands: Arc<dyn BrandContextProvider>,
    images: Arc<dyn ImageGenerator>,
    repository: Arc<dyn PosterSessionRepository>,
    locks: SessionTurnLocks,
}

impl<P: ?Sized + AIProvider> RefinePosterHandler<P> {
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
        cmd: RefinePosterCommand,
        metadata: CommandMetadata,
    ) -> Result<RefinePosterResult, PosterError> {
        require_text("edit request", &cmd.edit_request)?;
        let _turn = self.locks.acquire(cmd.session_id).await;

        let mut session =
            load_owned_session(self.repository.as_ref(), &cmd.session_id, &metadata.user_id)
                .await?;
        let current_prompt = session.editable_prompt()?.to_string();
        let brand =
            load_brand(self.brands.as_ref(), session.brand_kit_id(), &metadata.user_id).await?;

        let outcome = self
            .engine
            .modify(
                &brand,
                &current_prompt,
                session.gathered_info(),
                &cmd.edit_request,
                request_metadata(&metadata, cmd.session_id, *session.brand_kit_id()),
            )
            .await?;

        let generated = self.images.generate(&outcome.updated_prompt).await;
        if let Some(reason) = &generated.failure_reason {
            warn!(session_id = %cmd.session_id, reason = %reason, "Refined image failed");
        }
        let version = generated.into_version(outcome.updated_prompt.clone());

        session.apply_refinement(
            cmd.edit_request,
            outcome.explanation.clone(),
            outcome.updated_info,
            outcome.updated_prompt,
            version.clone(),
        )?;
        self.repository.update(&session).await?;

        info!(
            session_id = %cmd.session_id,
            versions = session.image_versions().len(),
            "Poster refined"
        );

        Ok(RefinePosterResult {
            session,
            version,
            explanation: outcome.explanation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockAIProvider, MockImageGenerator};
    use crate::application::handlers::poster::fixtures::{owner, stranger, Fixture};
    use crate::application::DEFAULT_EDIT_EXPLANATION;
    use crate::domain::poster::{GatheredInfo, GenerationStatus, PosterStage, TurnRole};
    use serde_json::json;

    fn handler(fx: &Fixture) -> RefinePosterHandler<MockAIProvider> {
        RefinePosterHandler::new(
            fx.engine.clone(),
            fx.brands.clone(),
            fx.images.clone(),
            fx.repository.clone(),
            fx.locks.clone(),
        )
    }

    fn edit(session: &PosterSession, request: &str) -> RefinePosterCommand {
        RefinePosterCommand {
            session_id: *session.id(),
            edit_request: request.to_string(),
        }
    }

    fn bigger_text() -> MockAIProvider {
        MockAIProvider::new()
            .with_json_response(json!({
                "updatedInfo": { "keyElements": "extra large headline" },
                "explanation": "Made the headline bigger."
            }))
            .with_response("Marketing poster, v2")
    }

    #[tokio::test]
    async fn edit_appends_exactly_one_version_and_two_turns() {
        let fx = Fixture::new(bigger_text());
        let session = fx.seed_completed().await;
        let turns_before = session.conversation_history().len();

        let result = handler(&fx).handle(edit(&session, "make the text bigger"), owner()).await.unwrap();

        let stored = fx.stored(session.id()).await;
        assert_eq!(stored.stage(), PosterStage::Refining);
        assert_eq!(stored.image_versions().len(), 2);
        assert_eq!(stored.image_versions()[0].prompt, "Marketing poster, v1");
        assert_eq!(stored.image_versions()[1].prompt, "Marketing poster, v2");
        assert_eq!(stored.current_version_index(), Some(1));
        assert_eq!(stored.refined_prompt(), Some("Marketing poster, v2"));
        assert_eq!(stored.gathered_info().key_elements(), Some("extra large headline"));
        assert_eq!(stored.gathered_info().message(), Some("50% OFF Summer Sale"));

        let history = stored.conversation_history();
        assert_eq!(history.len(), turns_before + 2);
        assert_eq!(history[turns_before].role, TurnRole::User);
        assert_eq!(history[turns_before].content, "make the text bigger");
        assert_eq!(history[turns_before + 1].content, "Made the headline bigger.");
        assert_eq!(result.explanation, "Made the headline bigger.");
    }

    #[tokio::test]
    async fn refining_is_reenterable() {
        let fx = Fixture::new(
            bigger_text()
                .with_json_response(json!({ "updatedInfo": { "mood": "calm" } }))
                .with_response("Marketing poster, v3"),
        );
        let session = fx.seed_completed().await;
        let handler = handler(&fx);

        handler.handle(edit(&session, "bigger"), owner()).await.unwrap();
        let result = handler.handle(edit(&session, "calmer"), owner()).await.unwrap();

        assert_eq!(result.session.image_versions().len(), 3);
        assert_eq!(result.session.stage(), PosterStage::Refining);
        assert_eq!(result.explanation, DEFAULT_EDIT_EXPLANATION);
    }

    #[tokio::test]
    async fn failed_generation_still_appends_version() {
        let fx = Fixture::with_images(bigger_text(), MockImageGenerator::new().with_failure("boom"));
        let session = fx.seed_completed().await;

        let result = handler(&fx).handle(edit(&session, "bigger"), owner()).await.unwrap();

        assert_eq!(result.version.status, GenerationStatus::Failed);
        assert_eq!(result.session.image_versions().len(), 2);
    }

    #[tokio::test]
    async fn gathering_session_cannot_be_refined() {
        let fx = Fixture::new(bigger_text());
        let session = fx.seed_gathering(GatheredInfo::default()).await;

        let result = handler(&fx).handle(edit(&session, "bigger"), owner()).await;

        assert!(matches!(result, Err(PosterError::State(_))));
        assert_eq!(fx.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn interpretation_failure_leaves_session_untouched() {
        let fx = Fixture::new(MockAIProvider::new().with_response("I cannot do that"));
        let session = fx.seed_completed().await;

        let result = handler(&fx).handle(edit(&session, "bigger"), owner()).await;

        assert!(matches!(result, Err(PosterError::MalformedResponse(_))));
        assert_eq!(fx.stored(session.id()).await, session);
        assert_eq!(fx.images.call_count(), 0);
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let fx = Fixture::new(bigger_text());
        let session = fx.seed_completed().await;

        let result = handler(&fx).handle(edit(&session, "bigger"), stranger()).await;

        assert!(matches!(result, Err(PosterError::Forbidden)));
    }

    #[tokio::test]
    async fn blank_edit_is_rejected() {
        let fx = Fixture::new(bigger_text());
        let session = fx.seed_completed().await;

        let result = handler(&fx).handle(edit(&session, " "), owner()).await;

        assert!(matches!(result, Err(PosterError::Validation(_))));
    }
}
