//! Single-session planner state
//!
//! One [`Session`] owns all ephemeral state for a planning run: the pack,
//! trip settings, chat history, the current AI analysis and suggestions,
//! and the single weight snapshot. Nothing persists across sessions.
//!
//! Mutations are synchronous; the only asynchronous work is the advisor
//! calls. Analysis re-runs are debounced and stale responses discarded
//! (last-scheduled-wins), so the pack can change freely without flooding
//! the advisor.

pub mod session;

use thiserror::Error;

pub use session::Session;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// An advisor-backed action is already in flight
    #[error("The advisor is busy; wait for the current action to finish")]
    Busy,

    #[error("Item name must not be empty")]
    EmptyName,

    #[error("Weight must be a non-negative number of grams")]
    InvalidWeight,

    #[error("No suggestion named \"{0}\"")]
    UnknownSuggestion(String),

    #[error("Analysis does not identify a strict subset of the pack as essential")]
    NothingToStrip,
}
