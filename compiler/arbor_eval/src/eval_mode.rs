//! Evaluation policies.
//!
//! [`EvalMode`] picks the defaults for a run (output sink, call-depth bound);
//! [`ReturnMode`] picks how far a `return` reaches.

use crate::output::{buffer_sink, stdout_sink, SharedOutput};

/// Evaluation mode. Defaults come from here; the builder can override them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// `arbor run`: output to stdout, call depth bounded only by memory.
    #[default]
    Interpret,
    /// Tests: output captured, call depth bounded so runaway recursion fails
    /// fast instead of exhausting the machine.
    TestRun,
}

impl EvalMode {
    /// Maximum nesting of `call`s, or `None` for unlimited.
    ///
    /// - `Interpret`: `None` on native (stacker grows the stack), 200 on WASM
    /// - `TestRun`: always 500
    #[inline]
    pub fn max_call_depth(self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::TestRun => Some(500),
        }
    }

    /// Default output sink for this mode.
    pub fn default_output(self) -> SharedOutput {
        match self {
            Self::Interpret => stdout_sink(),
            Self::TestRun => buffer_sink(),
        }
    }
}

/// How far a `return` reaches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReturnMode {
    /// A `return` stops only the block it is a direct child of. A `return`
    /// nested in an `if`/`while`/`for` body ends that body (or that loop
    /// iteration) and the enclosing block carries on.
    #[default]
    Shallow,
    /// A `return` anywhere stops every enclosing block up to the nearest
    /// `call`, or the whole program at top level.
    Unwind,
}
