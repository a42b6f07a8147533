//! Poster session repository port.
//!
//! Defines the contract for persisting and retrieving PosterSession
//! aggregates. Sessions are read and written whole; implementations need no
//! field-level concurrency control because handlers serialize turns per
//! session before touching the store.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PosterSessionId, UserId};
use crate::domain::poster::PosterSession;

/// Repository port for PosterSession persistence.
#[async_trait]
pub trait PosterSessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure or duplicate id
    async fn save(&self, session: &PosterSession) -> Result<(), DomainError>;

    /// Replace an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &PosterSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PosterSessionId) -> Result<Option<PosterSession>, DomainError>;

    /// Find all sessions owned by a user, most recently updated first.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<PosterSession>, DomainError>;
}
