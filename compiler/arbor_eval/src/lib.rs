//! Arbor Eval - interpreter for stored operation trees.
//!
//! Programs are executed straight from the store: there is no parse step and
//! no intermediate form. The interpreter walks the tree depth-first,
//! re-reading each node's parameters as it reaches it.
//!
//! # Architecture
//!
//! - [`coerce`]: turns a raw parameter string into a [`Value`] or resolves a
//!   `$name` variable reference
//! - [`Environments`]: arena of scopes addressed by [`EnvId`]; every block
//!   entry and call pushes a child scope that is released when it finishes
//! - [`evaluate_binary`]: arithmetic and comparison over [`Value`]s
//! - [`Interpreter`]: opcode dispatch (`execute`) and the block executor
//!   (`run_block`), mutually recursive
//! - [`OutputSink`]: where `print` writes (stdout, capture buffer, or nowhere)
//!
//! All failures are [`EvalError`]s and abort the current run.

mod coerce;
mod environment;
pub mod errors;
mod eval_mode;
pub mod interpreter;
mod operators;
mod output;
mod stack;
mod value;

pub use coerce::coerce;
pub use environment::{EnvId, Environments};
pub use errors::{EvalError, EvalResult};
pub use eval_mode::{EvalMode, ReturnMode};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, BinaryOp};
pub use output::{buffer_sink, discard_sink, stdout_sink, OutputSink, SharedOutput};
pub use stack::ensure_sufficient_stack;
pub use value::{FunctionValue, Value};
