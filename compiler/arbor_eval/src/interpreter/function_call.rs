//! Function definition and `call`.
//!
//! A function value is just a parameter list plus the id of its body. Calls
//! are dynamically scoped: the body runs in a child of the caller's scope,
//! so a function sees whatever the call chain can see, including itself
//! when it was defined at the root.

use arbor_ir::{Operation, Params};

use super::{required, Exit, Interpreter};
use crate::coerce::split_list;
use crate::environment::EnvId;
use crate::errors::{not_a_function, recursion_limit_exceeded, unbound_variable, EvalResult};
use crate::value::FunctionValue;
use crate::Value;

impl Interpreter<'_> {
    pub(super) fn eval_function_def(
        &mut self,
        env: EnvId,
        op: &Operation,
        params: &Params,
    ) -> EvalResult<Exit> {
        let name = required(op, params, "name")?;
        let function = FunctionValue {
            name: name.to_string(),
            params: params
                .get("params")
                .map(|list| split_list(list).map(str::to_string).collect())
                .unwrap_or_default(),
            body: op.id,
        };
        tracing::trace!(name, arity = function.params.len(), "define function");
        self.envs.bind(env, name, Value::Function(function));
        Ok(Exit::Normal(None))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(op = %op.id))]
    pub(super) fn eval_call(
        &mut self,
        env: EnvId,
        op: &Operation,
        params: &Params,
    ) -> EvalResult<Exit> {
        let args = params
            .get("args")
            .map(|list| {
                split_list(list)
                    .map(|arg| self.coerce(env, arg))
                    .collect::<EvalResult<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();
        let name = required(op, params, "name")?;
        let function = self.lookup_function(env, name)?;

        if let Some(limit) = self.max_call_depth {
            if self.call_depth >= limit {
                return Err(recursion_limit_exceeded(limit));
            }
        }
        self.call_depth += 1;
        let returned = self.invoke(env, &function, args);
        self.call_depth = self.call_depth.saturating_sub(1);
        let returned = returned?;

        if let (Some(target), Some(value)) = (params.get("result"), &returned) {
            self.envs.bind(env, target, value.clone());
        }
        Ok(Exit::Normal(returned))
    }

    fn lookup_function(&self, env: EnvId, name: &str) -> EvalResult<FunctionValue> {
        match self.envs.lookup(env, name) {
            Some(Value::Function(function)) => Ok(function.clone()),
            Some(other) => Err(not_a_function(name, other.type_name())),
            None => Err(unbound_variable(name)),
        }
    }

    /// Run `function`'s body in a child of the caller's scope.
    ///
    /// Parameters and arguments are zipped: surplus arguments are dropped
    /// and parameters without an argument stay unbound.
    fn invoke(
        &mut self,
        caller: EnvId,
        function: &FunctionValue,
        args: Vec<Value>,
    ) -> EvalResult<Option<Value>> {
        tracing::debug!(name = %function.name, depth = self.call_depth, "call");
        self.with_child_env(caller, |scoped, frame| {
            for (param, arg) in function.params.iter().zip(args) {
                scoped.envs.bind(frame, param.as_str(), arg);
            }
            scoped.exec_block(frame, Some(function.body)).map(Exit::into_value)
        })
    }
}
