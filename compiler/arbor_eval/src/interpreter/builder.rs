//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use arbor_store::Store;

use super::Interpreter;
use crate::environment::Environments;
use crate::eval_mode::{EvalMode, ReturnMode};
use crate::output::SharedOutput;

/// Builder for creating Interpreter instances.
///
/// The mode supplies the defaults:
/// - `EvalMode::Interpret` for `arbor run`: stdout, unbounded call depth
/// - `EvalMode::TestRun` for tests: captured output, call depth 500
///
/// Anything set explicitly overrides the mode's default.
pub struct InterpreterBuilder<'s> {
    store: &'s Store,
    mode: EvalMode,
    return_mode: ReturnMode,
    output: Option<SharedOutput>,
    max_call_depth: Option<usize>,
}

impl<'s> InterpreterBuilder<'s> {
    /// Create a new builder with default `Interpret` mode.
    pub fn new(store: &'s Store) -> Self {
        Self {
            store,
            mode: EvalMode::default(),
            return_mode: ReturnMode::default(),
            output: None,
            max_call_depth: None,
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn return_mode(mut self, return_mode: ReturnMode) -> Self {
        self.return_mode = return_mode;
        self
    }

    /// Where `print` writes.
    #[must_use]
    pub fn output(mut self, output: SharedOutput) -> Self {
        self.output = Some(output);
        self
    }

    /// Bound the nesting of `call`s.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter<'s> {
        let mode = self.mode;
        Interpreter {
            store: self.store,
            envs: Environments::new(),
            output: self.output.unwrap_or_else(|| mode.default_output()),
            mode,
            return_mode: self.return_mode,
            max_call_depth: self.max_call_depth.or_else(|| mode.max_call_depth()),
            call_depth: 0,
        }
    }
}
