//! Evaluation errors and their constructors.
//!
//! Every error a primitive or the binding store can raise is an `EvalError`.
//! Construct them through the factory functions below so the message and
//! the structured kind always agree.

use scm_ir::Symbol;

use crate::value::{Arity, Value};

/// Result of applying a primitive or resolving a binding.
pub type EvalResult = Result<Value, EvalError>;

/// Structured error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// No frame in the chain binds the symbol.
    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },

    #[error("{name}: expected {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: Arity,
        got: usize,
    },

    /// `position` is 1-based.
    #[error("{name}: argument {position} must be of type {expected}, got {got}")]
    TypeMismatch {
        name: String,
        position: usize,
        expected: &'static str,
        got: &'static str,
    },

    #[error("{name}: argument {position} must be a proper list")]
    ImproperList { name: String, position: usize },

    #[error("cannot apply a {type_name}")]
    NotCallable { type_name: &'static str },

    /// The symbol was interned by another environment's table.
    #[error("{name}: {symbol} belongs to another symbol table")]
    ForeignSymbol { name: String, symbol: Symbol },

    #[error("integer->char: {code} is not a Unicode scalar value")]
    InvalidCharCode { code: i64 },

    /// A lambda reached an executor that has no evaluator behind it.
    #[error("applying a lambda requires an evaluator")]
    RequiresEvaluator,

    /// Signaled by `error` or `raise`; the raised object is the payload.
    #[error("{message}")]
    Raised { message: String },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Object carried by `Raised` errors, for handlers to inspect.
    pub payload: Option<Value>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            payload: None,
        }
    }

    /// The raised object, when this error was signaled by user code.
    pub fn raised_value(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn is_unbound_variable(&self) -> bool {
        matches!(self.kind, EvalErrorKind::UnboundVariable { .. })
    }
}

// Binding Errors

#[cold]
pub fn unbound_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnboundVariable {
        name: name.to_string(),
    })
}

// Application Errors

#[cold]
pub fn wrong_arg_count(name: &str, expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// `position` is the 1-based argument position.
#[cold]
pub fn wrong_arg_type(
    name: &str,
    position: usize,
    expected: &'static str,
    got: &Value,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        name: name.to_string(),
        position,
        expected,
        got: got.type_name(),
    })
}

#[cold]
pub fn improper_list(name: &str, position: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImproperList {
        name: name.to_string(),
        position,
    })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    })
}

#[cold]
pub fn requires_evaluator() -> EvalError {
    EvalError::from_kind(EvalErrorKind::RequiresEvaluator)
}

#[cold]
pub fn foreign_symbol(name: &str, symbol: Symbol) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ForeignSymbol {
        name: name.to_string(),
        symbol,
    })
}

// Character Errors

#[cold]
pub fn invalid_char_code(code: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidCharCode { code })
}

// Signaled Conditions

/// An error signaled by user code, carrying the raised object.
#[cold]
pub fn raised(message: impl Into<String>, payload: Value) -> EvalError {
    EvalError {
        kind: EvalErrorKind::Raised {
            message: message.into(),
        },
        payload: Some(payload),
    }
}
