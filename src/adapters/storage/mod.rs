//! Storage adapters.
//!
//! - `InMemoryPosterSessionRepository` - whole-record session store
//! - `InMemoryBrandCatalog` - read-only brand kit lookup

mod in_memory_brand_catalog;
mod in_memory_poster_session_repository;

pub use in_memory_brand_catalog::InMemoryBrandCatalog;
pub use in_memory_poster_session_repository::InMemoryPosterSessionRepository;
