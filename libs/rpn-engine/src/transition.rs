//! Transition function
//!
//! `transition(state, action) -> state`, dispatched by action category:
//! - Validate: guards, always evaluated (see [`crate::validation`])
//! - Input: edit buffer only
//! - Stack: push / drop / clear
//! - Unary, Binary: arithmetic, skipped while an error is set
//!
//! Never panics and never fails; a failure is a state carrying an error tag.
//! The caller's state is never modified.

use crate::action::{Action, BinaryOperation, InputOperation, StackOperation, UnaryOperation};
use crate::edit;
use crate::error::ErrorKind;
use crate::state::{parse_entry, EngineState};
use crate::validation::validate;

/// Compute the state following `action`
pub fn transition(state: &EngineState, action: &Action) -> EngineState {
    let prior = state.clone();
    match action {
        Action::Validate(check) => validate(prior, *check),
        Action::Input(operation) => process_input(prior, operation),
        Action::Stack(operation) => process_stack(prior, *operation),
        Action::Unary(operation) => process_unary(prior, *operation),
        Action::Binary(operation) => process_binary(prior, *operation),
    }
}

/// Apply an ordered action sequence
///
/// Stops at the first action that leaves an error in the state, so an
/// operation never runs after one of its guards failed.
pub fn apply_sequence(state: &EngineState, actions: &[Action]) -> EngineState {
    let mut current = state.clone();
    for action in actions {
        current = transition(&current, action);
        if current.has_error() {
            break;
        }
    }
    current
}

// ============================================================================
// Input operations
// ============================================================================

fn process_input(prior: EngineState, operation: &InputOperation) -> EngineState {
    match operation {
        InputOperation::InsertCharacter(text) => {
            let buffer = edit::insert(prior.edit.as_deref(), text);
            EngineState {
                edit: Some(buffer),
                ..prior.without_error()
            }
        },
        InputOperation::DeleteCharacter => match prior.edit.as_deref() {
            Some(buffer) if !buffer.is_empty() => {
                let buffer = edit::delete_last(buffer);
                EngineState {
                    edit: Some(buffer),
                    ..prior.without_error()
                }
            },
            _ => prior,
        },
        InputOperation::ChangeSign => change_sign(prior),
    }
}

fn change_sign(prior: EngineState) -> EngineState {
    if let Some(buffer) = prior.edit.as_deref() {
        let buffer = edit::toggle_sign(buffer);
        return EngineState {
            edit: Some(buffer),
            ..prior.without_error()
        };
    }

    let mut next = prior.without_error();
    match next.stack.first_mut() {
        Some(top) => {
            *top = -*top;
            next
        },
        None => next.with_error(ErrorKind::TooFewArguments),
    }
}

// ============================================================================
// Stack operations
// ============================================================================

fn process_stack(prior: EngineState, operation: StackOperation) -> EngineState {
    match operation {
        StackOperation::Push => prior.without_error().end_input(),
        StackOperation::Drop => {
            let prior = prior.without_error();
            let unparsable = prior
                .edit
                .as_deref()
                .is_some_and(|buffer| !buffer.is_empty() && parse_entry(buffer).is_none());
            if unparsable {
                // an entry that never parsed is discarded, not committed
                return EngineState { edit: None, ..prior };
            }
            let mut next = prior.end_input();
            if next.stack.is_empty() {
                return next.with_error(ErrorKind::TooFewArguments);
            }
            next.stack.remove(0);
            next
        },
        StackOperation::ClearStack => EngineState::new(),
    }
}

// ============================================================================
// Arithmetic operations
// ============================================================================

fn process_unary(prior: EngineState, operation: UnaryOperation) -> EngineState {
    if prior.has_error() {
        return prior;
    }
    let mut next = prior.end_input();
    if next.has_error() {
        return next;
    }
    if next.stack.is_empty() {
        return next.with_error(ErrorKind::TooFewArguments);
    }

    let result = operation.apply(next.stack[0]);
    if !result.is_finite() {
        return next.with_error(ErrorKind::InfiniteResult);
    }
    next.stack[0] = result;
    next
}

fn process_binary(prior: EngineState, operation: BinaryOperation) -> EngineState {
    if prior.has_error() {
        return prior;
    }
    let mut next = prior.end_input();
    if next.has_error() {
        return next;
    }
    if next.stack.len() < 2 {
        return next.with_error(ErrorKind::TooFewArguments);
    }
    if operation == BinaryOperation::Divide && next.stack[0] == 0.0 {
        // reached without a NonZeroRegister guard
        return next.with_error(ErrorKind::InfiniteResult);
    }

    let result = operation.apply(next.stack[0], next.stack[1]);
    if !result.is_finite() {
        // overflow leaves both operands in place
        return next.with_error(ErrorKind::InfiniteResult);
    }
    next.stack.drain(..2);
    next.stack.insert(0, result);
    next
}
