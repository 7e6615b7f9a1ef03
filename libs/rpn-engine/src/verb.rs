//! Verbs - the public calculator operations
//!
//! Each verb expands into a fixed action sequence. Arithmetic verbs put
//! their guards in front of the operation:
//!
//! | Verb | Actions |
//! |------|---------|
//! | `add` | `MinArgs(2)`, `Add` |
//! | `subtract` | `MinArgs(2)`, `Subtract` |
//! | `multiply` | `MinArgs(2)`, `Multiply` |
//! | `divide` | `MinArgs(2)`, `NonZeroRegister(0)`, `Divide` |
//! | `sin` | `MinArgs(1)`, `Sin` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::{Action, BinaryOperation, UnaryOperation};
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    /// Type text into the edit buffer, one character at a time
    Insert(String),
    RemoveCharacter,
    ChangeSign,
    Push,
    Drop,
    Clear,
    Add,
    Subtract,
    Multiply,
    Divide,
    Sin,
}

/// Verbs addressable by name, in help order
pub const NAMED_VERBS: [Verb; 10] = [
    Verb::Add,
    Verb::Subtract,
    Verb::Multiply,
    Verb::Divide,
    Verb::Sin,
    Verb::ChangeSign,
    Verb::Push,
    Verb::Drop,
    Verb::Clear,
    Verb::RemoveCharacter,
];

impl Verb {
    /// Action sequence dispatched for this verb
    pub fn actions(&self) -> Vec<Action> {
        match self {
            Self::Insert(text) => text
                .chars()
                .map(|c| Action::insert_character(c.to_string()))
                .collect(),
            Self::RemoveCharacter => vec![Action::delete_character()],
            Self::ChangeSign => vec![Action::change_sign()],
            Self::Push => vec![Action::push()],
            Self::Drop => vec![Action::drop()],
            Self::Clear => vec![Action::clear_stack()],
            Self::Add => binary(BinaryOperation::Add),
            Self::Subtract => binary(BinaryOperation::Subtract),
            Self::Multiply => binary(BinaryOperation::Multiply),
            Self::Divide => vec![
                Action::min_args(2),
                Action::non_zero_register(0),
                Action::Binary(BinaryOperation::Divide),
            ],
            Self::Sin => vec![Action::min_args(1), Action::Unary(UnaryOperation::Sin)],
        }
    }

    /// Canonical command name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::RemoveCharacter => "del",
            Self::ChangeSign => "chs",
            Self::Push => "push",
            Self::Drop => "drop",
            Self::Clear => "clear",
            Self::Add => "add",
            Self::Subtract => "sub",
            Self::Multiply => "mul",
            Self::Divide => "div",
            Self::Sin => "sin",
        }
    }

    /// Accepted spellings (name first)
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Insert(_) => &["insert"],
            Self::RemoveCharacter => &["del", "backspace"],
            Self::ChangeSign => &["chs", "neg"],
            Self::Push => &["push", "enter"],
            Self::Drop => &["drop"],
            Self::Clear => &["clear"],
            Self::Add => &["add", "+"],
            Self::Subtract => &["sub", "subtract", "-"],
            Self::Multiply => &["mul", "multiply", "*"],
            Self::Divide => &["div", "divide", "/"],
            Self::Sin => &["sin"],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Insert(_) => "Type characters into the edit buffer",
            Self::RemoveCharacter => "Delete the last typed character",
            Self::ChangeSign => "Toggle sign of the entry, exponent or top of stack",
            Self::Push => "Commit the entry onto the stack",
            Self::Drop => "Discard the top of stack",
            Self::Clear => "Clear stack, entry and error",
            Self::Add => "y + x",
            Self::Subtract => "y - x",
            Self::Multiply => "y * x",
            Self::Divide => "y / x",
            Self::Sin => "sin(x), radians",
        }
    }
}

fn binary(operation: BinaryOperation) -> Vec<Action> {
    vec![Action::min_args(2), Action::Binary(operation)]
}

impl FromStr for Verb {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        NAMED_VERBS
            .iter()
            .find(|verb| verb.aliases().contains(&lower.as_str()))
            .cloned()
            .ok_or_else(|| EngineError::unknown_verb(s))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(text) => write!(f, "insert({:?})", text),
            other => f.write_str(other.name()),
        }
    }
}
