//! StartPosterHandler - opens a poster-design conversation.

use std::sync::Arc;

use tracing::info;

use crate::application::PosterConversationEngine;
use crate::domain::foundation::{BrandKitId, CommandMetadata, PosterSessionId};
use crate::domain::poster::{PosterError, PosterSession};
use crate::ports::{AIProvider, BrandContextProvider, PosterSessionRepository};

use super::support::{load_brand, request_metadata, require_text};

/// Command to start designing a poster for a brand kit.
#[derive(Debug, Clone)]
pub struct StartPosterCommand {
    pub brand_kit_id: BrandKitId,
    /// Free-text description of the poster the user wants.
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct StartPosterResult {
    pub session: PosterSession,
    /// Follow-up questions to show the user.
    pub questions: Vec<String>,
}

pub struct StartPosterHandler<P: ?Sized + AIProvider> {
    engine: Arc<PosterConversationEngine<P>>,
    brands: Arc<dyn BrandContextProvider>,
    repository: Arc<dyn PosterSessionRepository>,
}

impl<P: ?Sized + AIProvider> StartPosterHandler<P> {
    pub fn new(
        engine: Arc<PosterConversationEngine<P>>,
        brands: Arc<dyn BrandContextProvider>,
        repository: Arc<dyn PosterSessionRepository>,
    ) -> Self {
        Self {
            engine,
            brands,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartPosterCommand,
        metadata: CommandMetadata,
    ) -> Result<StartPosterResult, PosterError> {
        require_text("poster description", &cmd.description)?;

        // 1. Brand must exist and belong to the caller
        let brand = load_brand(self.brands.as_ref(), &cmd.brand_kit_id, &metadata.user_id).await?;

        // 2. Opening clarification
        let session_id = PosterSessionId::new();
        let outcome = self
            .engine
            .start_session(
                &brand,
                &cmd.description,
                request_metadata(&metadata, session_id, cmd.brand_kit_id),
            )
            .await?;

        // 3. Persist the new session
        let session = PosterSession::start(
            session_id,
            metadata.user_id.clone(),
            cmd.brand_kit_id,
            cmd.description,
            outcome.gathered_info,
        )?;
        self.repository.save(&session).await?;

        info!(
            session_id = %session_id,
            brand_kit_id = %cmd.brand_kit_id,
            questions = outcome.questions.len(),
            "Poster session started"
        );

        Ok(StartPosterResult {
            session,
            questions: outcome.questions,
        })
    }
}
