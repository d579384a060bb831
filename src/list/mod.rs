//! Paged lists: incremental loading and duplicate-free merging of
//! server-paginated collections.
//!
//! # Architecture
//!
//! Uses the MVI pattern from [`crate::mvi`]:
//! - `state.rs` - accumulated items, offset, and loading gates
//! - `intent.rs` - requests started, pages arrived, failures
//! - `reducer.rs` - state transitions and the stale-response guard
//! - `controller.rs` - issues fetches and dispatches their results

mod controller;
mod intent;
mod reducer;
mod state;

pub use controller::{ListOptions, LoadOutcome, PagedListController};
pub use intent::ListIntent;
pub use reducer::ListReducer;
pub use state::{ListError, ListItem, ListState, LoadPhase, DEFAULT_PAGE_SIZE};
