//! Poster conversation command and query handlers.

mod get_poster_session;
mod refine_poster;
mod reply_to_poster;
mod select_image_version;
mod start_poster;
mod support;
mod turn_locks;

#[cfg(test)]
pub(crate) mod fixtures;

pub use get_poster_session::{
    GetPosterSessionHandler, GetPosterSessionQuery, ListPosterSessionsHandler,
    ListPosterSessionsQuery,
};
pub use refine_poster::{RefinePosterCommand, RefinePosterHandler, RefinePosterResult};
pub use reply_to_poster::{
    ReplyOutcome, ReplyToPosterCommand, ReplyToPosterHandler, ReplyToPosterResult,
};
pub use select_image_version::{
    SelectImageVersionCommand, SelectImageVersionHandler, SelectImageVersionResult,
};
pub use start_poster::{StartPosterCommand, StartPosterHandler, StartPosterResult};
pub use turn_locks::{SessionTurnGuard, SessionTurnLocks};
