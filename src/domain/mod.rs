//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `brand` - Read-only brand identity consumed by poster prompts
//! - `poster` - Poster-design conversation: stages, gathered info, intent
//!   classification, prompt templates, session aggregate

pub mod brand;
pub mod foundation;
pub mod poster;
