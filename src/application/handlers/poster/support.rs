//! Loading helpers shared by the poster handlers.

use crate::domain::brand::BrandContext;
use crate::domain::foundation::{BrandKitId, CommandMetadata, PosterSessionId, UserId};
use crate::domain::poster::{PosterError, PosterSession};
use crate::ports::{BrandContextProvider, PosterSessionRepository, RequestMetadata};

/// Loads a session and checks that `user_id` owns it.
///
/// # Errors
///
/// - `Validation` if the session does not exist
/// - `Forbidden` if another user owns it
pub(crate) async fn load_owned_session(
    repository: &dyn PosterSessionRepository,
    session_id: &PosterSessionId,
    user_id: &UserId,
) -> Result<PosterSession, PosterError> {
    let session = repository
        .find_by_id(session_id)
        .await?
        .ok_or_else(|| PosterError::validation(format!("poster session {} not found", session_id)))?;
    session.authorize(user_id)?;
    Ok(session)
}

/// Loads a brand kit the user may design with.
///
/// Unknown and foreign brand kits are reported identically.
pub(crate) async fn load_brand(
    brands: &dyn BrandContextProvider,
    brand_kit_id: &BrandKitId,
    user_id: &UserId,
) -> Result<BrandContext, PosterError> {
    brands
        .get_by_id(brand_kit_id)
        .await?
        .filter(|brand| brand.is_owner(user_id))
        .ok_or_else(|| PosterError::validation(format!("brand kit {} not found", brand_kit_id)))
}

pub(crate) fn request_metadata(
    metadata: &CommandMetadata,
    session_id: PosterSessionId,
    brand_kit_id: BrandKitId,
) -> RequestMetadata {
    RequestMetadata::new(metadata.trace_id())
        .with_user(metadata.user_id.clone())
        .with_session(session_id)
        .with_brand_kit(brand_kit_id)
}

/// Rejects blank user text.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), PosterError> {
    if value.trim().is_empty() {
        Err(PosterError::validation(format!("{} cannot be empty", field)))
    } else {
        Ok(())
    }
}
