//! Binary operator implementations.
//!
//! The operator set is fixed, so dispatch is a plain `match` over
//! [`BinaryOp`]. Arithmetic is defined on numbers only: an integer pair stays
//! integral (checked for overflow), anything involving a float is computed
//! in `f64`, and `div` always produces a float.

use std::cmp::Ordering;

use crate::errors::{division_by_zero, integer_overflow, type_mismatch, EvalResult};
use crate::Value;

/// Arithmetic and comparison operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
    Gt,
}

impl BinaryOp {
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Eq => "eq",
            BinaryOp::Lt => "lt",
            BinaryOp::Gt => "gt",
        }
    }
}

/// Numeric view of a value.
#[derive(Copy, Clone, Debug)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(x) => Some(Number::Float(*x)),
            _ => None,
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "mixed arithmetic is defined in f64")]
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }
}

/// Evaluate `left op right`.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => arith(op, left, right, i64::checked_add, |a, b| a + b),
        BinaryOp::Sub => arith(op, left, right, i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => arith(op, left, right, i64::checked_mul, |a, b| a * b),
        BinaryOp::Div => divide(left, right),
        BinaryOp::Eq => Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::Lt => compare(op, left, right).map(|ord| Value::Bool(ord == Ordering::Less)),
        BinaryOp::Gt => compare(op, left, right).map(|ord| Value::Bool(ord == Ordering::Greater)),
    }
}

fn numbers(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<(Number, Number)> {
    match (Number::of(left), Number::of(right)) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(type_mismatch(op.name(), left.type_name(), right.type_name())),
    }
}

fn arith(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    match numbers(op, left, right)? {
        (Number::Int(a), Number::Int(b)) => int_op(a, b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow(op.name())),
        (l, r) => Ok(Value::Float(float_op(l.as_f64(), r.as_f64()))),
    }
}

fn divide(left: &Value, right: &Value) -> EvalResult {
    let (l, r) = numbers(BinaryOp::Div, left, right)?;
    let divisor = r.as_f64();
    if divisor == 0.0 {
        return Err(division_by_zero());
    }
    Ok(Value::Float(l.as_f64() / divisor))
}

/// Equality for the `eq` opcode. Numbers compare by magnitude across
/// int/float; values of different kinds are simply unequal.
#[allow(clippy::float_cmp, reason = "eq is exact equality by definition")]
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Function(a), Value::Function(b)) => a.body == b.body,
        _ => match (Number::of(left), Number::of(right)) {
            (Some(l), Some(r)) => l.as_f64() == r.as_f64(),
            _ => false,
        },
    }
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<Ordering> {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Ok(a.cmp(b));
    }
    match numbers(op, left, right)? {
        (Number::Int(a), Number::Int(b)) => Ok(a.cmp(&b)),
        // NaN is neither less nor greater than anything.
        (l, r) => Ok(l
            .as_f64()
            .partial_cmp(&r.as_f64())
            .unwrap_or(Ordering::Equal)),
    }
}
