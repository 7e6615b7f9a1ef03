//! Error types for rpn-engine
//!
//! Two different things live here:
//! - [`ErrorKind`]: the closed vocabulary recorded *inside* an engine state
//!   when an action fails. It is data, never returned as `Err`.
//! - [`EngineError`]: failures at the library edges (parsing verbs from
//!   text, snapshot encoding) that callers handle with `?`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine error tag carried by a failed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ErrorKind {
    /// An operation needed more operands than the stack holds
    #[error("Too few arguments")]
    TooFewArguments,

    /// Division with a zero divisor
    #[error("Infinite result")]
    InfiniteResult,

    /// The edit buffer does not hold a finite number
    #[error("Invalid number")]
    InvalidNumber,
}

impl ErrorKind {
    /// Stable tag name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooFewArguments => "TooFewArguments",
            Self::InfiniteResult => "InfiniteResult",
            Self::InvalidNumber => "InvalidNumber",
        }
    }
}

/// Library edge errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown verb: {0}")]
    UnknownVerb(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl EngineError {
    pub fn unknown_verb(name: impl Into<String>) -> Self {
        Self::UnknownVerb(name.into())
    }

    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_serializes_as_tag() {
        let json = serde_json::to_string(&ErrorKind::TooFewArguments).unwrap();
        assert_eq!(json, "\"TooFewArguments\"");

        let kind: ErrorKind = serde_json::from_str("\"InfiniteResult\"").unwrap();
        assert_eq!(kind, ErrorKind::InfiniteResult);
        assert_eq!(kind.as_str(), "InfiniteResult");
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::TooFewArguments.to_string(), "Too few arguments");
        assert_eq!(ErrorKind::InfiniteResult.to_string(), "Infinite result");
    }

    #[test]
    fn test_engine_error_from_json() {
        let err: EngineError = serde_json::from_str::<ErrorKind>("\"Bogus\"")
            .unwrap_err()
            .into();
        assert!(matches!(err, EngineError::Snapshot(_)));
    }
}
