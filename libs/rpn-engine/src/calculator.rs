//! Calculator - state-owning front end over the transition function
//!
//! Holds the current [`EngineState`] and exposes the verb API. Every call
//! runs the verb's action sequence through [`apply_sequence`] and replaces
//! the held state with the result. No global store: callers own their
//! `Calculator` and serialize access to it.

use tracing::{debug, trace};

use crate::action::Action;
use crate::state::EngineState;
use crate::transition::{apply_sequence, transition};
use crate::verb::Verb;

#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: EngineState,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously captured state
    pub fn from_state(state: EngineState) -> Self {
        Self { state }
    }

    /// Current state snapshot
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn into_state(self) -> EngineState {
        self.state
    }

    /// Apply a single raw action, bypassing verb sequencing
    pub fn apply(&mut self, action: &Action) -> &EngineState {
        trace!(action = %action.label(), "apply");
        self.state = transition(&self.state, action);
        &self.state
    }

    /// Run a verb's full action sequence
    pub fn run(&mut self, verb: &Verb) -> &EngineState {
        let actions = verb.actions();
        debug!(verb = %verb, actions = actions.len(), "dispatch");

        self.state = apply_sequence(&self.state, &actions);

        if let Some(kind) = self.state.error {
            debug!(verb = %verb, error = kind.as_str(), "verb failed");
        }
        trace!(
            depth = self.state.stack.len(),
            editing = self.state.is_editing(),
            "state updated"
        );
        &self.state
    }

    // ===== Input =====

    pub fn insert_character(&mut self, c: char) -> &EngineState {
        self.run(&Verb::Insert(c.to_string()))
    }

    pub fn insert_number(&mut self, text: &str) -> &EngineState {
        self.run(&Verb::Insert(text.to_string()))
    }

    pub fn remove_character(&mut self) -> &EngineState {
        self.run(&Verb::RemoveCharacter)
    }

    pub fn change_sign(&mut self) -> &EngineState {
        self.run(&Verb::ChangeSign)
    }

    // ===== Stack =====

    pub fn push(&mut self) -> &EngineState {
        self.run(&Verb::Push)
    }

    pub fn drop(&mut self) -> &EngineState {
        self.run(&Verb::Drop)
    }

    pub fn clear(&mut self) -> &EngineState {
        self.run(&Verb::Clear)
    }

    // ===== Operations =====

    pub fn add(&mut self) -> &EngineState {
        self.run(&Verb::Add)
    }

    pub fn subtract(&mut self) -> &EngineState {
        self.run(&Verb::Subtract)
    }

    pub fn multiply(&mut self) -> &EngineState {
        self.run(&Verb::Multiply)
    }

    pub fn divide(&mut self) -> &EngineState {
        self.run(&Verb::Divide)
    }

    pub fn sin(&mut self) -> &EngineState {
        self.run(&Verb::Sin)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tracing_test::traced_test;

    #[test]
    fn test_calculator_starts_idle() {
        let calc = Calculator::new();
        assert_eq!(calc.state(), &EngineState::new());
    }

    #[test]
    fn test_insert_and_push() {
        let mut calc = Calculator::new();
        calc.insert_character('5');
        calc.insert_character('4');
        assert_eq!(calc.state().edit.as_deref(), Some("54"));
        calc.push();
        assert_eq!(calc.state(), &EngineState::with_stack(vec![54.0]));
    }

    #[test]
    fn test_from_state_resumes() {
        let mut calc = Calculator::from_state(EngineState::with_stack(vec![4.0, 8.0]));
        calc.divide();
        assert_eq!(calc.into_state(), EngineState::with_stack(vec![2.0]));
    }

    #[test]
    fn test_apply_raw_action() {
        let mut calc = Calculator::new();
        calc.apply(&Action::insert_character("9"));
        calc.apply(&Action::push());
        assert_eq!(calc.state().stack, vec![9.0]);
    }

    #[test]
    #[traced_test]
    fn test_failed_verb_is_logged() {
        let mut calc = Calculator::new();
        calc.add();
        assert_eq!(calc.state().error, Some(ErrorKind::TooFewArguments));
        assert!(logs_contain("verb failed"));
        assert!(logs_contain("TooFewArguments"));
    }

    #[test]
    #[traced_test]
    fn test_dispatch_is_logged() {
        let mut calc = Calculator::new();
        calc.insert_number("12");
        assert!(logs_contain("dispatch"));
    }
}
