//! Reducer for paged lists.

use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::ListIntent;
use super::state::{append_unique, ListError, ListItem, ListState, LoadPhase};

/// Reducer for paged list state transitions.
///
/// Responses whose generation differs from the state's are dropped
/// unchanged; that is the only ordering guard lists need.
pub struct ListReducer<T>(PhantomData<T>);

impl<T: ListItem> Reducer for ListReducer<T> {
    type State = ListState<T>;
    type Intent = ListIntent<T>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListIntent::InitialStarted { filters } => {
                state.generation += 1;
                state.filters = filters;
                // Offset drops to 0 when the first page lands, so a failed
                // refresh leaves load_more continuing after the kept items.
                state.loading = true;
                state.loading_more = false;
                state.error = None;
                state
            }

            ListIntent::Reset { filters } => {
                // Cleared before the request goes out, not when it returns.
                ListState {
                    generation: state.generation + 1,
                    filters,
                    loading: true,
                    ..ListState::new(state.page_size)
                }
            }

            ListIntent::MoreStarted => {
                if !state.can_load_more() {
                    return state;
                }
                state.loading_more = true;
                state.error = None;
                state
            }

            ListIntent::PageLoaded {
                generation,
                phase,
                offset,
                page,
            } => {
                if generation != state.generation {
                    return state;
                }
                match phase {
                    LoadPhase::Initial if state.loading => {
                        state.items.clear();
                        append_unique(&mut state.items, page.items);
                        state.total = page.total;
                        state.offset = offset;
                        state.loading = false;
                        state.loaded = true;
                        state
                    }
                    LoadPhase::More if state.loading_more => {
                        append_unique(&mut state.items, page.items);
                        state.total = page.total;
                        state.offset = offset;
                        state.loading_more = false;
                        state
                    }
                    // No request of this phase is in flight.
                    _ => state,
                }
            }

            ListIntent::PageFailed {
                generation,
                phase,
                message,
            } => {
                if generation != state.generation {
                    return state;
                }
                match phase {
                    LoadPhase::Initial if state.loading => state.loading = false,
                    LoadPhase::More if state.loading_more => state.loading_more = false,
                    _ => return state,
                }
                state.error = Some(ListError { phase, message });
                state
            }

            ListIntent::Inserted { item } => {
                if append_unique(&mut state.items, vec![item]) > 0 {
                    state.total += 1;
                }
                state
            }

            ListIntent::ErrorDismissed => {
                state.error = None;
                state
            }
        }
    }
}
