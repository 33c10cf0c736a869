//! `if`/`else`, `while` and `for`.
//!
//! Every body runs in a fresh child scope: one per branch taken, one per
//! loop iteration. Loop conditions are re-read in the scope the loop itself
//! runs in, so bindings made by the body are never visible to them.

use arbor_ir::{Opcode, Operation, Params};

use super::{required, Exit, Interpreter};
use crate::environment::EnvId;
use crate::errors::EvalResult;
use crate::eval_mode::ReturnMode;
use crate::Value;

impl Interpreter<'_> {
    pub(super) fn eval_if(
        &mut self,
        env: EnvId,
        op: &Operation,
        params: &Params,
    ) -> EvalResult<Exit> {
        let condition = self.coerce(env, required(op, params, "condition")?)?;
        let branch = if condition.is_truthy() {
            op.id
        } else {
            match self.store.first_child_with(op.id, &Opcode::Else)? {
                Some(otherwise) => otherwise.id,
                None => return Ok(Exit::Normal(None)),
            }
        };
        self.with_child_env(env, |scoped, child| scoped.exec_block(child, Some(branch)))
    }

    pub(super) fn eval_while(
        &mut self,
        env: EnvId,
        op: &Operation,
        params: &Params,
    ) -> EvalResult<Exit> {
        let condition = required(op, params, "condition")?;
        let mut iterations: u64 = 0;
        while self.coerce(env, condition)?.is_truthy() {
            iterations += 1;
            let exit =
                self.with_child_env(env, |scoped, child| scoped.exec_block(child, Some(op.id)))?;
            if let Some(exit) = self.escaping(exit) {
                return Ok(exit);
            }
        }
        tracing::trace!(id = %op.id, iterations, "while finished");
        Ok(Exit::Normal(None))
    }

    pub(super) fn eval_for(
        &mut self,
        env: EnvId,
        op: &Operation,
        params: &Params,
    ) -> EvalResult<Exit> {
        let iterator = required(op, params, "iterator")?;
        let items = self
            .coerce(env, required(op, params, "collection")?)?
            .iter_items()?;
        for item in items {
            let exit = self.for_iteration(env, op, iterator, item)?;
            if let Some(exit) = self.escaping(exit) {
                return Ok(exit);
            }
        }
        Ok(Exit::Normal(None))
    }

    fn for_iteration(
        &mut self,
        env: EnvId,
        op: &Operation,
        iterator: &str,
        item: Value,
    ) -> EvalResult<Exit> {
        self.with_child_env(env, |scoped, child| {
            scoped.envs.bind(child, iterator, item);
            scoped.exec_block(child, Some(op.id))
        })
    }

    /// A loop body's exit that also ends the loop.
    ///
    /// Under shallow returns a `return` only ends its own iteration.
    fn escaping(&self, exit: Exit) -> Option<Exit> {
        match exit {
            Exit::Return(value) if self.return_mode == ReturnMode::Unwind => {
                Some(Exit::Return(value))
            }
            Exit::Normal(_) | Exit::Return(_) => None,
        }
    }
}
