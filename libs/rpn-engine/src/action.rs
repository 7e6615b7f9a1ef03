//! Engine actions
//!
//! Closed tagged variants replacing string-typed action dispatch. Every
//! action belongs to exactly one category; the transition function matches
//! on the category first.

use serde::{Deserialize, Serialize};

/// One step fed to the transition function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "payload", rename_all = "snake_case")]
pub enum Action {
    /// Precondition check guarding a following operation
    Validate(Validation),
    /// Edit-buffer manipulation
    Input(InputOperation),
    /// Push / drop / clear
    Stack(StackOperation),
    /// One-operand arithmetic
    Unary(UnaryOperation),
    /// Two-operand arithmetic
    Binary(BinaryOperation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Stack must hold at least `n` values
    MinArgs(usize),
    /// Stack register `i` (0 = top) must be non-zero
    NonZeroRegister(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputOperation {
    InsertCharacter(String),
    DeleteCharacter,
    ChangeSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackOperation {
    Push,
    Drop,
    ClearStack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperation {
    Sin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl UnaryOperation {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
        }
    }
}

impl BinaryOperation {
    /// Combine top-of-stack `x` with second-from-top `y`
    ///
    /// The earlier pushed operand `y` is the left-hand side of the
    /// non-commutative operators.
    pub fn apply(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Add => x + y,
            Self::Subtract => y - x,
            Self::Multiply => x * y,
            Self::Divide => y / x,
        }
    }
}

// Shorthand constructors

impl Action {
    pub fn min_args(n: usize) -> Self {
        Self::Validate(Validation::MinArgs(n))
    }

    pub fn non_zero_register(index: usize) -> Self {
        Self::Validate(Validation::NonZeroRegister(index))
    }

    pub fn insert_character(c: impl Into<String>) -> Self {
        Self::Input(InputOperation::InsertCharacter(c.into()))
    }

    pub fn delete_character() -> Self {
        Self::Input(InputOperation::DeleteCharacter)
    }

    pub fn change_sign() -> Self {
        Self::Input(InputOperation::ChangeSign)
    }

    pub fn push() -> Self {
        Self::Stack(StackOperation::Push)
    }

    pub fn drop() -> Self {
        Self::Stack(StackOperation::Drop)
    }

    pub fn clear_stack() -> Self {
        Self::Stack(StackOperation::ClearStack)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validate(_))
    }

    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Unary(_) | Self::Binary(_))
    }

    /// Short label used in logs
    pub fn label(&self) -> String {
        match self {
            Self::Validate(Validation::MinArgs(n)) => format!("min_args({})", n),
            Self::Validate(Validation::NonZeroRegister(i)) => format!("non_zero_register({})", i),
            Self::Input(InputOperation::InsertCharacter(c)) => format!("insert_character({:?})", c),
            Self::Input(InputOperation::DeleteCharacter) => "delete_character".to_string(),
            Self::Input(InputOperation::ChangeSign) => "change_sign".to_string(),
            Self::Stack(StackOperation::Push) => "push".to_string(),
            Self::Stack(StackOperation::Drop) => "drop".to_string(),
            Self::Stack(StackOperation::ClearStack) => "clear_stack".to_string(),
            Self::Unary(op) => format!("{:?}", op).to_lowercase(),
            Self::Binary(op) => format!("{:?}", op).to_lowercase(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operand_order() {
        // x = top, y = second from top
        assert_eq!(BinaryOperation::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(BinaryOperation::Subtract.apply(2.0, 3.0), 1.0);
        assert_eq!(BinaryOperation::Multiply.apply(4.0, 2.0), 8.0);
        assert_eq!(BinaryOperation::Divide.apply(4.0, 8.0), 2.0);
    }

    #[test]
    fn test_unary_sin() {
        let result = UnaryOperation::Sin.apply(std::f64::consts::FRAC_PI_2);
        assert!((result - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_action_serde_shape() {
        let json = serde_json::to_string(&Action::min_args(2)).unwrap();
        assert_eq!(json, r#"{"category":"validate","payload":{"min_args":2}}"#);

        let json = serde_json::to_string(&Action::Binary(BinaryOperation::Divide)).unwrap();
        assert_eq!(json, r#"{"category":"binary","payload":"divide"}"#);

        let back: Action =
            serde_json::from_str(r#"{"category":"input","payload":{"insert_character":"7"}}"#)
                .unwrap();
        assert_eq!(back, Action::insert_character("7"));
    }

    #[test]
    fn test_categories() {
        assert!(Action::non_zero_register(0).is_validation());
        assert!(Action::Unary(UnaryOperation::Sin).is_operation());
        assert!(!Action::push().is_operation());
        assert_eq!(Action::Binary(BinaryOperation::Add).label(), "add");
        assert_eq!(Action::min_args(2).label(), "min_args(2)");
    }
}
