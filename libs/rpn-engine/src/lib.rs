//! rpn-engine - Stack-based (RPN) calculator engine
//!
//! A deterministic state machine with two concerns: the edit buffer for the
//! number being typed, and the operand stack that arithmetic acts on.
//!
//! # Features
//!
//! - **Pure transitions**: `transition(&state, &action) -> state`, never panics,
//!   never mutates the input state
//! - **Validation layer**: arity and zero-divisor guards run before the
//!   operation they protect
//! - **Errors as state**: failures tag the state instead of returning `Err`
//!
//! # Example
//!
//! ```rust
//! use rpn_engine::{Calculator, ErrorKind};
//!
//! let mut calc = Calculator::new();
//! calc.insert_number("8");
//! calc.push();
//! calc.insert_number("4");
//! calc.push();
//! calc.divide();
//! assert_eq!(calc.state().stack, vec![2.0]);
//!
//! // Dividing by zero never executes
//! calc.insert_number("0");
//! calc.divide();
//! assert_eq!(calc.state().error, Some(ErrorKind::InfiniteResult));
//! assert_eq!(calc.state().stack, vec![0.0, 2.0]);
//! ```
//!
//! # Verbs
//!
//! | Verb | Action sequence |
//! |------|-----------------|
//! | `insert_character(c)` / `insert_number(s)` | `InsertCharacter` per character |
//! | `remove_character()` | `DeleteCharacter` |
//! | `change_sign()` | `ChangeSign` |
//! | `push()` / `drop()` / `clear()` | `Push` / `Drop` / `ClearStack` |
//! | `add()` `subtract()` `multiply()` | `MinArgs(2)`, op |
//! | `divide()` | `MinArgs(2)`, `NonZeroRegister(0)`, `Divide` |
//! | `sin()` | `MinArgs(1)`, `Sin` |

pub mod action;
pub mod calculator;
pub mod edit;
pub mod error;
pub mod state;
pub mod transition;
pub mod validation;
pub mod verb;

// Re-exports for convenience
pub use action::{
    Action, BinaryOperation, InputOperation, StackOperation, UnaryOperation, Validation,
};
pub use calculator::Calculator;
pub use error::{EngineError, ErrorKind, Result};
pub use state::{parse_entry, EngineState, Mode};
pub use transition::{apply_sequence, transition};
pub use verb::{Verb, NAMED_VERBS};
