//! Brand context provider port.
//!
//! Brand kits are owned by another subsystem; poster handlers only read them.

use async_trait::async_trait;

use crate::domain::brand::BrandContext;
use crate::domain::foundation::{BrandKitId, DomainError};

/// Read-only lookup of brand kits.
#[async_trait]
pub trait BrandContextProvider: Send + Sync {
    /// Find a brand kit by its ID.
    ///
    /// Returns `None` if not found.
    async fn get_by_id(&self, id: &BrandKitId) -> Result<Option<BrandContext>, DomainError>;
}
