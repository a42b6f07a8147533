//! Poster module - the poster-design conversation.
//!
//! Contains the session aggregate and the pure pieces the conversation
//! engine is built from:
//!
//! - `PosterStage` - GATHERING → (READY) → COMPLETED → REFINING lifecycle
//! - `GatheredInfo` - additively merged poster requirements
//! - `classify_marketing_intent` - shared keyword classifier
//! - prompt templates and the deterministic fallback builder
//! - `PosterSession` - append-only conversation and image version chain

mod errors;
mod extractor;
mod gathered_info;
mod image_version;
mod intent;
pub mod prompts;
mod reply;
mod session;
mod stage;
mod turn;

pub use errors::PosterError;
pub use extractor::{extract_json, ExtractionError, MAX_REPLY_LENGTH};
pub use gathered_info::{GatheredInfo, DEFAULT_DIMENSIONS, DEFAULT_KEY_ELEMENTS, DEFAULT_MESSAGE};
pub use image_version::{GenerationStatus, ImageVersion};
pub use intent::{classify_marketing_intent, IntentTag, MarketingIntent, StyleDefaults};
pub use reply::{ModifyReply, RefineReply, StartReply};
pub use session::PosterSession;
pub use stage::PosterStage;
pub use turn::{questions_asked, render_transcript, ConversationTurn, TurnRole};
