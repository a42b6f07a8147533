//! Brand module - the brand identity consumed by poster prompts.
//!
//! Brand kits are owned by the brand-kit subsystem; this crate only reads
//! them. A `BrandContext` is immutable for the duration of a session.

mod context;

pub use context::{BrandColors, BrandContext, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};
