//! Model-View-Intent (MVI) primitives.
//!
//! All list state changes go through a reducer:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: plain data, everything a view needs to render
//! - **Intent**: user actions or completed requests
//! - **Reducer**: pure function from (state, intent) to the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{dispatch, Reducer};
pub use state::UiState;
