//! Quote cache manager.
//!
//! Owns the working set of quotes and decides, at startup and on request,
//! whether to serve the persisted [`CacheRecord`] or go back to the remote
//! endpoint. The persisted record is not precious: deleting it only costs a
//! fetch.
//!
//! # Lifecycle
//! - **Idle**: nothing loaded (fresh start, or just cleared).
//! - **Loading**: a fetch is in flight.
//! - **Ready**: serving a fresh record or a successful fetch.
//! - **Degraded**: the last fetch failed; serving whatever was loaded before,
//!   or the built-in fallback quotes if nothing was.

pub mod error;
mod fallback;
mod manager;
mod record;
mod set;
mod state;

pub use crate::fallback::fallback_quotes;
pub use crate::manager::CacheManager;
pub use crate::record::CacheRecord;
pub use crate::set::QuoteSet;
pub use crate::state::{CacheState, Level, Status};
