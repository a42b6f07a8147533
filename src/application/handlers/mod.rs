//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod poster;

pub use poster::{
    GetPosterSessionHandler, GetPosterSessionQuery, ListPosterSessionsHandler,
    ListPosterSessionsQuery, RefinePosterCommand, RefinePosterHandler, RefinePosterResult,
    ReplyOutcome, ReplyToPosterCommand, ReplyToPosterHandler, ReplyToPosterResult,
    SelectImageVersionCommand, SelectImageVersionHandler, SelectImageVersionResult,
    SessionTurnGuard, SessionTurnLocks, StartPosterCommand, StartPosterHandler,
    StartPosterResult,
};
