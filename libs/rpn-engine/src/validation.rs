//! Validation layer
//!
//! Guards run before the operation they protect. Each guard first commits
//! any pending edit and drops a stale error, then computes a fresh verdict.

use crate::action::Validation;
use crate::error::ErrorKind;
use crate::state::EngineState;

/// Apply one guard to `state`
pub fn validate(state: EngineState, check: Validation) -> EngineState {
    let state = state.without_error().end_input();
    if state.has_error() {
        // pending edit did not commit
        return state;
    }

    match verdict(&state, check) {
        Some(kind) => state.with_error(kind),
        None => state,
    }
}

/// Error the guard raises against an already committed state, if any
pub fn verdict(state: &EngineState, check: Validation) -> Option<ErrorKind> {
    match check {
        Validation::MinArgs(n) => (state.stack.len() < n).then_some(ErrorKind::TooFewArguments),
        Validation::NonZeroRegister(index) => match state.register(index) {
            None => Some(ErrorKind::TooFewArguments),
            Some(value) if value == 0.0 => Some(ErrorKind::InfiniteResult),
            Some(_) => None,
        },
    }
}
