//! Runtime errors.
//!
//! Every variant is fatal to the current run: nothing is caught or retried
//! inside the interpreter, and output already emitted stays emitted.
//!
//! The `#[cold]` constructors below are the preferred way to build errors
//! from interpreter code; they keep the hot paths small.

use arbor_ir::{OpId, Opcode, Operation};
use arbor_store::StoreError;

/// Result of evaluation.
pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

/// Evaluation error.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// Lookup walked past the root scope without finding the name.
    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },

    /// A `call` target is bound, but not to a function.
    #[error("`{name}` is not a function (found {type_name})")]
    NotAFunction {
        name: String,
        type_name: &'static str,
    },

    #[error("type mismatch: cannot apply `{operation}` to {left} and {right}")]
    TypeMismatch {
        operation: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("{type_name} is not iterable")]
    NotIterable { type_name: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in `{operation}`")]
    IntegerOverflow { operation: &'static str },

    #[error("operation {op} (`{opcode}`) is missing required parameter `{key}`")]
    MissingParameter {
        op: OpId,
        opcode: Opcode,
        key: &'static str,
    },

    #[error("maximum call depth exceeded (limit: {limit})")]
    RecursionLimitExceeded { limit: usize },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

// Variable and function errors

#[cold]
pub fn unbound_variable(name: &str) -> EvalError {
    EvalError::UnboundVariable {
        name: name.to_string(),
    }
}

#[cold]
pub fn not_a_function(name: &str, type_name: &'static str) -> EvalError {
    EvalError::NotAFunction {
        name: name.to_string(),
        type_name,
    }
}

// Operator errors

#[cold]
pub fn type_mismatch(
    operation: &'static str,
    left: &'static str,
    right: &'static str,
) -> EvalError {
    EvalError::TypeMismatch {
        operation,
        left,
        right,
    }
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::IntegerOverflow { operation }
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::DivisionByZero
}

#[cold]
pub fn not_iterable(type_name: &'static str) -> EvalError {
    EvalError::NotIterable { type_name }
}

// Program shape errors

#[cold]
pub fn missing_parameter(op: &Operation, key: &'static str) -> EvalError {
    EvalError::MissingParameter {
        op: op.id,
        opcode: op.opcode.clone(),
        key,
    }
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::RecursionLimitExceeded { limit }
}
