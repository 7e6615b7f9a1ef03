//! Engine state value
//!
//! The operand stack, the optional edit buffer and the optional last error.
//! Index 0 of the stack is top-of-stack.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};

/// Calculator engine state
///
/// `edit == None` means "not editing"; `edit == Some("")` is a valid editing
/// state (everything typed was deleted again).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Operand stack, top-of-stack first
    #[serde(default)]
    pub stack: Vec<f64>,

    /// Raw text of the number being typed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<String>,

    /// Error raised by the last action, if it failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

/// Coarse state machine position derived from an [`EngineState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Idle,
    Editing,
    Errored,
}

impl EngineState {
    /// Fresh state: empty stack, not editing, no error
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a committed stack state (top-of-stack first)
    pub fn with_stack(stack: Vec<f64>) -> Self {
        Self {
            stack,
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn is_stack_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Top-of-stack value
    pub fn top(&self) -> Option<f64> {
        self.stack.first().copied()
    }

    /// Stack register `index` (0 = top)
    pub fn register(&self, index: usize) -> Option<f64> {
        self.stack.get(index).copied()
    }

    pub fn mode(&self) -> Mode {
        if self.error.is_some() {
            Mode::Errored
        } else if self.edit.is_some() {
            Mode::Editing
        } else {
            Mode::Idle
        }
    }

    /// Same state tagged with `kind`
    pub fn with_error(mut self, kind: ErrorKind) -> Self {
        self.error = Some(kind);
        self
    }

    /// Same state with any stale error dropped
    pub fn without_error(mut self) -> Self {
        self.error = None;
        self
    }

    /// Commit the edit buffer onto the stack
    ///
    /// - editing, non-empty buffer: parse, push on top, stop editing
    /// - editing, empty buffer: stop editing, push nothing
    /// - not editing: unchanged
    ///
    /// A buffer that does not parse to a finite number is left in place and
    /// the state is tagged [`ErrorKind::InvalidNumber`].
    pub fn end_input(mut self) -> Self {
        let Some(text) = self.edit.take() else {
            return self;
        };
        if text.is_empty() {
            return self;
        }
        match parse_entry(&text) {
            Some(value) => {
                self.stack.insert(0, value);
                self
            },
            None => {
                self.edit = Some(text);
                self.with_error(ErrorKind::InvalidNumber)
            },
        }
    }

    /// Encode as a JSON snapshot
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse edit buffer text into a stack value
///
/// Surrounding whitespace is ignored. Empty text, unparseable text and
/// non-finite results (`inf`, `NaN`, overflowing exponents) yield `None`.
pub fn parse_entry(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
