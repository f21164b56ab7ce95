//! Quote rotation and display history.
//!
//! [`RotationEngine::pick_next`] chooses the next quote to show from the
//! current working set; every pick bumps the persisted display counter and
//! lands at the front of the bounded [`History`].

mod engine;
pub mod error;
mod history;

pub use crate::engine::RotationEngine;
pub use crate::history::{History, HistoryEntry};
