//! Error types for formula compilation and evaluation.

use thiserror::Error;

/// Errors raised while compiling or evaluating a formula.
///
/// Compile-time errors (`Syntax`, `UndefinedName`, `UnknownAttribute`,
/// `UnknownFunction`) are detected before any value is read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { message: String, offset: usize },

    #[error("name '{name}' is not defined")]
    UndefinedName { name: String, offset: usize },

    #[error("unknown attribute '{name}'")]
    UnknownAttribute { name: String, offset: usize },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, offset: usize },

    #[error("'{type_name}' object has no attribute '{attribute}'")]
    InvalidAttribute {
        type_name: &'static str,
        attribute: &'static str,
    },

    #[error("unsupported operand type(s) for {op}: '{left}' and '{right}'")]
    UnsupportedOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("bad operand type for unary {op}: '{operand}'")]
    UnsupportedOperand {
        op: &'static str,
        operand: &'static str,
    },

    #[error("{function}() takes {expected} argument(s), got {found}")]
    ArgumentCount {
        function: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("invalid argument for {function}(): {message}")]
    InvalidArgument {
        function: &'static str,
        message: String,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("result too large (limit {limit} items)")]
    ResultTooLarge { limit: usize },

    #[error("the result is not a string (got '{0}')")]
    NotAString(&'static str),
}

impl EvaluationError {
    pub(crate) fn syntax(message: impl Into<String>, offset: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }

    /// Returns true for errors detected while compiling, before evaluation.
    #[must_use]
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. }
                | Self::UndefinedName { .. }
                | Self::UnknownAttribute { .. }
                | Self::UnknownFunction { .. }
        )
    }
}

/// Result type for formula operations.
pub type Result<T> = std::result::Result<T, EvaluationError>;
