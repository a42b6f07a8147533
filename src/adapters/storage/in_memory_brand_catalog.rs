//! In-memory brand kit catalog.
//!
//! Holds brand contexts keyed by id. The terminal driver seeds it from a
//! JSON file or a built-in demo brand.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::brand::BrandContext;
use crate::domain::foundation::{BrandKitId, DomainError, ErrorCode};
use crate::ports::BrandContextProvider;

#[derive(Debug, Clone, Default)]
pub struct InMemoryBrandCatalog {
    brands: Arc<RwLock<HashMap<BrandKitId, BrandContext>>>,
}

impl InMemoryBrandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog holding the given brands.
    pub fn with_brands(brands: impl IntoIterator<Item = BrandContext>) -> Self {
        let map = brands.into_iter().map(|b| (*b.id(), b)).collect();
        Self {
            brands: Arc::new(RwLock::new(map)),
        }
    }

    /// Reads one brand context (camelCase JSON) from disk.
    pub async fn load_brand_file(path: impl AsRef<Path>) -> Result<BrandContext, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            DomainError::new(ErrorCode::InvalidFormat, format!("Invalid brand kit JSON: {}", e))
                .with_detail("path", path.display().to_string())
        })
    }

    /// Adds or replaces a brand.
    pub async fn insert(&self, brand: BrandContext) {
        self.brands.write().await.insert(*brand.id(), brand);
    }
}

#[async_trait]
impl BrandContextProvider for InMemoryBrandCatalog {
    async fn get_by_id(&self, id: &BrandKitId) -> Result<Option<BrandContext>, DomainError> {
        Ok(self.brands.read().await.get(id).cloned())
    }
}
