//! BrandVibe Poster Studio - conversational marketing poster design
//!
//! This crate implements the multi-turn poster-design conversation: a
//! bounded clarification dialogue, readiness detection, image prompt
//! synthesis with a deterministic fallback, and a version-chained
//! refinement loop over generated images.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
