//! In-memory poster session store.
//!
//! Sessions are cloned in and out whole, so a caller mutating a loaded
//! session never affects the stored copy until it calls `update`.
//! Does not persist data across restarts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PosterSessionId, UserId};
use crate::domain::poster::PosterSession;
use crate::ports::PosterSessionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPosterSessionRepository {
    sessions: Arc<RwLock<HashMap<PosterSessionId, PosterSession>>>,
}

impl InMemoryPosterSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl PosterSessionRepository for InMemoryPosterSessionRepository {
    async fn save(&self, session: &PosterSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Poster session {} already exists", session.id()),
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &PosterSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session.id()) {
            Some(stored) => {
                *stored = session.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Poster session {} not found", session.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &PosterSessionId) -> Result<Option<PosterSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<PosterSession>, DomainError> {
        let mut owned: Vec<PosterSession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.is_owner(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::BrandKitId;
    use crate::domain::poster::GatheredInfo;

    fn session(user: &str) -> PosterSession {
        PosterSession::start(
            PosterSessionId::new(),
            UserId::new(user).unwrap(),
            BrandKitId::new(),
            "Poster for a sale",
            GatheredInfo::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_find_returns_copy() {
        let repo = InMemoryPosterSessionRepository::new();
        let session = session("alice");

        repo.save(&session).await.unwrap();

        let found = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(found, session);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_id() {
        let repo = InMemoryPosterSessionRepository::new();
        let session = session("alice");
        repo.save(&session).await.unwrap();

        let err = repo.save(&session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn update_replaces_whole_record() {
        let repo = InMemoryPosterSessionRepository::new();
        let mut session = session("alice");
        repo.save(&session).await.unwrap();

        session.record_user_reply("Square, please").unwrap();
        repo.update(&session).await.unwrap();

        let found = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(found.conversation_history().len(), 2);
    }

    #[tokio::test]
    async fn update_unknown_session_is_not_found() {
        let repo = InMemoryPosterSessionRepository::new();

        let err = repo.update(&session("alice")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn find_by_user_filters_by_owner() {
        let repo = InMemoryPosterSessionRepository::new();
        repo.save(&session("alice")).await.unwrap();
        repo.save(&session("alice")).await.unwrap();
        repo.save(&session("bob")).await.unwrap();

        let alice = repo.find_by_user_id(&UserId::new("alice").unwrap()).await.unwrap();
        let carol = repo.find_by_user_id(&UserId::new("carol").unwrap()).await.unwrap();

        assert_eq!(alice.len(), 2);
        assert!(carol.is_empty());
    }
}
