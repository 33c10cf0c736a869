//! Tree-walking interpreter.
//!
//! `execute` runs one operation; `run_block` runs the ordered children of a
//! node. The two recurse into each other: compound opcodes (`if`, `while`,
//! `for`, `call`) hand their bodies to `run_block`, which calls back into
//! `execute` for every child.
//!
//! - `block.rs` - the block executor and return propagation
//! - `control.rs` - `if`/`else`, `while`, `for`
//! - `function_call.rs` - `function` definitions and `call`
//! - `scope_guard.rs` - child scopes released on drop
//!
//! The store is only read. Each node's parameters are fetched when the node
//! is reached, so a program is never loaded as a whole.

mod block;
mod builder;
mod control;
mod function_call;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use arbor_ir::{OpId, Opcode, Operation, Params};
use arbor_store::Store;

use crate::coerce::coerce;
use crate::environment::{EnvId, Environments};
use crate::errors::{missing_parameter, EvalResult};
use crate::eval_mode::{EvalMode, ReturnMode};
use crate::operators::{evaluate_binary, BinaryOp};
use crate::output::SharedOutput;
use crate::stack::ensure_sufficient_stack;
use crate::Value;

/// How control left an operation or block.
#[derive(Debug)]
pub(crate) enum Exit {
    /// Ran to completion, possibly producing a value.
    Normal(Option<Value>),
    /// Stopped by a `return`.
    Return(Option<Value>),
}

impl Exit {
    fn into_value(self) -> Option<Value> {
        match self {
            Exit::Normal(value) | Exit::Return(value) => value,
        }
    }
}

/// Interpreter for one program run.
///
/// Owns the scope arena; borrows the store. Build with
/// [`InterpreterBuilder`].
pub struct Interpreter<'s> {
    store: &'s Store,
    pub(crate) envs: Environments,
    output: SharedOutput,
    mode: EvalMode,
    return_mode: ReturnMode,
    max_call_depth: Option<usize>,
    call_depth: usize,
}

impl<'s> Interpreter<'s> {
    /// Interpreter with default settings (`EvalMode::Interpret`).
    pub fn new(store: &'s Store) -> Self {
        InterpreterBuilder::new(store).build()
    }

    /// Run the program: the root operations, in sequence order, in the
    /// root scope.
    pub fn run(&mut self) -> EvalResult<Option<Value>> {
        tracing::debug!(mode = ?self.mode, return_mode = ?self.return_mode, "program start");
        let result = self.run_block(EnvId::ROOT, None);
        match &result {
            Ok(_) => tracing::debug!("program finished"),
            Err(err) => tracing::debug!(%err, "program aborted"),
        }
        result
    }

    /// Run the children of `parent` (root operations for `None`) in `env`.
    ///
    /// Yields the value of the `return` that stopped the block, if any.
    pub fn run_block(&mut self, env: EnvId, parent: Option<OpId>) -> EvalResult<Option<Value>> {
        self.exec_block(env, parent).map(Exit::into_value)
    }

    /// Execute a single operation in `env`.
    pub fn execute(&mut self, env: EnvId, op: &Operation) -> EvalResult<Option<Value>> {
        self.exec(env, op).map(Exit::into_value)
    }

    /// Opcode dispatch.
    pub(crate) fn exec(&mut self, env: EnvId, op: &Operation) -> EvalResult<Exit> {
        ensure_sufficient_stack(|| -> EvalResult<Exit> {
            tracing::trace!(id = %op.id, opcode = %op.opcode, ?env, "execute");
            let params = self.store.parameters_of(op.id)?;
            match &op.opcode {
                Opcode::Assign => self.eval_assign(env, op, &params),
                Opcode::Print => self.eval_print(env, op, &params),
                Opcode::Add => self.eval_binary(env, op, &params, BinaryOp::Add),
                Opcode::Sub => self.eval_binary(env, op, &params, BinaryOp::Sub),
                Opcode::Mul => self.eval_binary(env, op, &params, BinaryOp::Mul),
                Opcode::Div => self.eval_binary(env, op, &params, BinaryOp::Div),
                Opcode::Eq => self.eval_binary(env, op, &params, BinaryOp::Eq),
                Opcode::Lt => self.eval_binary(env, op, &params, BinaryOp::Lt),
                Opcode::Gt => self.eval_binary(env, op, &params, BinaryOp::Gt),
                Opcode::If => self.eval_if(env, op, &params),
                // Only reachable through `if`'s else lookup.
                Opcode::Else => Ok(Exit::Normal(None)),
                Opcode::While => self.eval_while(env, op, &params),
                Opcode::For => self.eval_for(env, op, &params),
                Opcode::Function => self.eval_function_def(env, op, &params),
                Opcode::Call => self.eval_call(env, op, &params),
                Opcode::Return => self.eval_return(env, &params),
                Opcode::Break | Opcode::Continue => {
                    tracing::debug!(id = %op.id, opcode = %op.opcode, "opcode has no effect");
                    Ok(Exit::Normal(None))
                }
                Opcode::Unknown(tag) => {
                    tracing::debug!(id = %op.id, tag = %tag, "skipping unknown opcode");
                    Ok(Exit::Normal(None))
                }
            }
        })
    }

    /// Coerce raw parameter text in `env`.
    #[inline]
    pub(crate) fn coerce(&self, env: EnvId, raw: &str) -> EvalResult<Value> {
        coerce(&self.envs, env, raw)
    }

    fn eval_assign(&mut self, env: EnvId, op: &Operation, params: &Params) -> EvalResult<Exit> {
        let name = required(op, params, "var_name")?;
        let value = self.coerce(env, required(op, params, "value")?)?;
        self.envs.bind(env, name, value);
        Ok(Exit::Normal(None))
    }

    fn eval_print(&mut self, env: EnvId, op: &Operation, params: &Params) -> EvalResult<Exit> {
        let value = self.coerce(env, required(op, params, "value")?)?;
        self.output.emit_line(&value.to_string());
        Ok(Exit::Normal(None))
    }

    fn eval_binary(
        &mut self,
        env: EnvId,
        op: &Operation,
        params: &Params,
        binary: BinaryOp,
    ) -> EvalResult<Exit> {
        let left = self.coerce(env, required(op, params, "left")?)?;
        let right = self.coerce(env, required(op, params, "right")?)?;
        let outcome = evaluate_binary(binary, &left, &right)?;
        if let Some(target) = params.get("result") {
            self.envs.bind(env, target, outcome.clone());
        }
        Ok(Exit::Normal(Some(outcome)))
    }

    fn eval_return(&mut self, env: EnvId, params: &Params) -> EvalResult<Exit> {
        let value = params
            .get("value")
            .map(|raw| self.coerce(env, raw))
            .transpose()?;
        Ok(Exit::Return(value))
    }

    // Inspection

    /// Look up `name` in the root scope.
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.envs.lookup(EnvId::ROOT, name)
    }

    /// The scope arena.
    pub fn environments(&self) -> &Environments {
        &self.envs
    }

    /// The output sink `print` writes to.
    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    /// Output captured so far (empty unless the sink is a buffer).
    pub fn captured_output(&self) -> String {
        self.output.captured()
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn return_mode(&self) -> ReturnMode {
        self.return_mode
    }
}

/// A parameter the opcode cannot run without.
fn required<'p>(op: &Operation, params: &'p Params, key: &'static str) -> EvalResult<&'p str> {
    params.get(key).ok_or_else(|| missing_parameter(op, key))
}

#[cfg(test)]
mod tests;
