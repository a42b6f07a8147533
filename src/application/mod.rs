//! Application layer - the conversation engine and its handlers.
//!
//! `PosterConversationEngine` makes the model calls of a turn; the handlers
//! load sessions, serialize turns per session, call the engine and image
//! generator, and write sessions back whole.

pub mod handlers;
mod poster_engine;

pub use handlers::{
    GetPosterSessionHandler, GetPosterSessionQuery, ListPosterSessionsHandler,
    ListPosterSessionsQuery, RefinePosterCommand, RefinePosterHandler, RefinePosterResult,
    ReplyOutcome, ReplyToPosterCommand, ReplyToPosterHandler, ReplyToPosterResult,
    SelectImageVersionCommand, SelectImageVersionHandler, SelectImageVersionResult,
    SessionTurnGuard, SessionTurnLocks, StartPosterCommand, StartPosterHandler,
    StartPosterResult,
};
pub use poster_engine::{
    ModifyOutcome, PosterConversationEngine, PosterEngineConfig, RefineOutcome, StartOutcome,
    DEFAULT_EDIT_EXPLANATION,
};
