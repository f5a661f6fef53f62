//! Explicit state containers that replace the dashboard's global stores.
//!
//! Callers own these values and pass them by reference; nothing here is a
//! process-wide singleton.

pub mod board;
pub mod matching;

pub use board::MarketBoard;
pub use matching::{CriteriaUpdate, MatchingSession, Settlement};
