//! Parameter coercion.
//!
//! Parameters are stored as text. Coercion decides what a piece of text means
//! at runtime, first match wins:
//!
//! 1. `$name` resolves `name` through the environment chain
//! 2. an integer literal becomes `Int`
//! 3. a floating-point literal becomes `Float`
//! 4. exactly `true` or `false` becomes `Bool`
//! 5. anything else is kept verbatim as `Str`, quotes and all
//!
//! Coercion never fails on its own; only an unbound `$name` is an error.

use crate::environment::{EnvId, Environments};
use crate::errors::{unbound_variable, EvalResult};
use crate::Value;

/// Coerce raw parameter text in the scope `env`.
pub fn coerce(envs: &Environments, env: EnvId, raw: &str) -> EvalResult<Value> {
    if let Some(name) = raw.strip_prefix('$') {
        return envs
            .lookup(env, name)
            .cloned()
            .ok_or_else(|| unbound_variable(name));
    }
    Ok(literal(raw))
}

fn literal(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(x) = raw.parse::<f64>() {
        return Value::Float(x);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Str(raw.to_string()),
    }
}

/// Split a comma-separated list (`params`, `args`), trimming each entry.
///
/// Empty entries keep their position: `"1,,3"` is three entries.
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim)
}

#[cfg(test)]
mod tests;
