//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

/// Run `R` over the state stored in `slot`, in place.
pub fn dispatch<R: Reducer>(slot: &mut R::State, intent: R::Intent) {
    *slot = R::reduce(std::mem::take(slot), intent);
}
