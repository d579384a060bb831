//! Session context injected into list views.
//!
//! Replaces process-wide "current user" and "categories" caches with an
//! explicit handle that is refreshed and invalidated on purpose.

mod state;

pub use state::{SessionContext, SessionError, CATEGORIES_PATH, CURRENT_USER_PATH};
