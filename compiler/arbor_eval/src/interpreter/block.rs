//! Block execution and return propagation.

use arbor_ir::{OpId, Opcode};

use super::{Exit, Interpreter};
use crate::environment::EnvId;
use crate::errors::EvalResult;
use crate::eval_mode::ReturnMode;

impl Interpreter<'_> {
    /// Run the children of `parent` in order.
    ///
    /// `else` children are skipped: they only run through their `if`. A
    /// `return` child stops the block. A `return` reached inside a nested
    /// body stops only that body, unless the interpreter was built with
    /// [`ReturnMode::Unwind`].
    pub(crate) fn exec_block(&mut self, env: EnvId, parent: Option<OpId>) -> EvalResult<Exit> {
        let children = self.store.children_of(parent)?;
        for child in &children {
            if child.opcode == Opcode::Else {
                continue;
            }
            let exit = self.exec(env, child)?;
            if child.opcode == Opcode::Return {
                return Ok(Exit::Return(exit.into_value()));
            }
            if let Exit::Return(value) = exit {
                if self.return_mode == ReturnMode::Unwind {
                    return Ok(Exit::Return(value));
                }
            }
        }
        Ok(Exit::Normal(None))
    }
}
