//! Intents for paged lists.

use crate::api::{Filters, PageResult};
use crate::mvi::Intent;

use super::state::LoadPhase;

/// Everything that can happen to a paged list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListIntent<T> {
    /// First page requested; keeps current items until the page arrives.
    InitialStarted { filters: Filters },

    /// Filter or sort changed; discards everything before requesting.
    Reset { filters: Filters },

    /// Next page requested. Ignored when the list cannot load more.
    MoreStarted,

    /// A page arrived for the request issued under `generation`.
    PageLoaded {
        generation: u64,
        phase: LoadPhase,
        offset: usize,
        page: PageResult<T>,
    },

    /// The request issued under `generation` failed.
    PageFailed {
        generation: u64,
        phase: LoadPhase,
        message: String,
    },

    /// A locally created item, shown before the server lists it.
    Inserted { item: T },

    /// User closed the error message.
    ErrorDismissed,
}

impl<T: Send + 'static> Intent for ListIntent<T> {}
