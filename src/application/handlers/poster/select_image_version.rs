//! SelectImageVersionHandler - moves a session's current-version pointer.
//!
//! Selecting never mutates the version chain; a later edit still starts
//! from the session's latest refined prompt.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{CommandMetadata, PosterSessionId};
use crate::domain::poster::{ImageVersion, PosterError, PosterSession};
use crate::ports::PosterSessionRepository;

use super::support::load_owned_session;
use super::SessionTurnLocks;

#[derive(Debug, Clone)]
pub struct SelectImageVersionCommand {
    pub session_id: PosterSessionId,
    /// Zero-based index into the session's image versions.
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct SelectImageVersionResult {
    pub session: PosterSession,
    pub selected: ImageVersion,
}

pub struct SelectImageVersionHandler {
    repository: Arc<dyn PosterSessionRepository>,
    locks: SessionTurnLocks,
}

impl SelectImageVersionHandler {
    pub fn new(repository: Arc<dyn PosterSessionRepository>, locks: SessionTurnLocks) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(
        &self,
        cmd: SelectImageVersionCommand,
        metadata: CommandMetadata,
    ) -> Result<SelectImageVersionResult, PosterError> {
        let _turn = self.locks.acquire(cmd.session_id).await;

        let mut session =
            load_owned_session(self.repository.as_ref(), &cmd.session_id, &metadata.user_id)
                .await?;
        let selected = session.select_version(cmd.index)?.clone();
        self.repository.update(&session).await?;

        debug!(session_id = %cmd.session_id, index = cmd.index, "Image version selected");

        Ok(SelectImageVersionResult { session, selected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockAIProvider;
    use crate::application::handlers::poster::fixtures::{owner, stranger, Fixture};

    fn handler(fx: &Fixture) -> SelectImageVersionHandler {
        SelectImageVersionHandler::new(fx.repository.clone(), fx.locks.clone())
    }

    #[tokio::test]
    async fn selects_existing_version() {
        let fx = Fixture::new(MockAIProvider::new());
        let session = fx.seed_completed().await;

        let result = handler(&fx)
            .handle(SelectImageVersionCommand { session_id: *session.id(), index: 0 }, owner())
            .await
            .unwrap();

        assert_eq!(result.selected.image_url, "https://img/v1.png");
        assert_eq!(fx.stored(session.id()).await.current_version_index(), Some(0));
    }

    #[tokio::test]
    async fn out_of_range_index_is_validation_error() {
        let fx = Fixture::new(MockAIProvider::new());
        let session = fx.seed_completed().await;

        let result = handler(&fx)
            .handle(SelectImageVersionCommand { session_id: *session.id(), index: 5 }, owner())
            .await;

        assert!(matches!(result, Err(PosterError::Validation(_))));
        assert_eq!(fx.stored(session.id()).await, session);
    }

    #[tokio::test]
    async fn stranger_is_forbidden() {
        let fx = Fixture::new(MockAIProvider::new());
        let session = fx.seed_completed().await;

        let result = handler(&fx)
            .handle(SelectImageVersionCommand { session_id: *session.id(), index: 0 }, stranger())
            .await;

        assert!(matches!(result, Err(PosterError::Forbidden)));
    }
}
