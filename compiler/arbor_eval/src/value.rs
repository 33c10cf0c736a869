//! Runtime values.

use std::fmt;

use arbor_ir::OpId;

use crate::errors::{not_iterable, EvalResult};

/// A runtime value.
///
/// `PartialEq` is structural: `Int(2)` and `Float(2.0)` are different values.
/// The `eq` opcode uses [`crate::evaluate_binary`], which compares numbers by
/// magnitude instead.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Raw text, including any quote characters the author stored.
    Str(String),
    Function(FunctionValue),
}

/// A function bound in an environment.
///
/// Holds only the parameter names and the id of the operation whose children
/// form the body. There is no captured scope: a call runs the body in a child
/// of the caller's environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionValue {
    pub name: String,
    pub params: Vec<String>,
    pub body: OpId,
}

impl Value {
    #[inline]
    pub fn str(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness for `if`/`while` conditions.
    ///
    /// Zero, `false` and the empty string are falsy; everything else,
    /// functions included, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Function(_) => true,
        }
    }

    /// Elements visited by a `for` loop: a string yields its characters.
    pub fn iter_items(&self) -> EvalResult<Vec<Value>> {
        match self {
            Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            other => Err(not_iterable(other.type_name())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            // Debug keeps the fractional part, so `div(4, 2)` prints as `2.0`.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Function(func) => {
                write!(f, "<function {}({})>", func.name, func.params.join(", "))
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
