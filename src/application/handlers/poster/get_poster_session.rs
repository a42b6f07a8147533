//! Owner-scoped poster session queries.

use std::sync::Arc;

use crate::domain::foundation::{PosterSessionId, UserId};
use crate::domain::poster::{PosterError, PosterSession};
use crate::ports::PosterSessionRepository;

use super::support::load_owned_session;

#[derive(Debug, Clone)]
pub struct GetPosterSessionQuery {
    pub session_id: PosterSessionId,
    pub user_id: UserId,
}

pub struct GetPosterSessionHandler {
    repository: Arc<dyn PosterSessionRepository>,
}

impl GetPosterSessionHandler {
    pub fn new(repository: Arc<dyn PosterSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPosterSessionQuery) -> Result<PosterSession, PosterError> {
        load_owned_session(self.repository.as_ref(), &query.session_id, &query.user_id).await
    }
}

/// Lists a user's sessions, most recently updated first.
#[derive(Debug, Clone)]
pub struct ListPosterSessionsQuery {
    pub user_id: UserId,
}

pub struct ListPosterSessionsHandler {
    repository: Arc<dyn PosterSessionRepository>,
}

impl ListPosterSessionsHandler {
    pub fn new(repository: Arc<dyn PosterSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListPosterSessionsQuery,
    ) -> Result<Vec<PosterSession>, PosterError> {
        Ok(self.repository.find_by_user_id(&query.user_id).await?)
    }
}
