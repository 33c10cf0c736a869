//! Arbor Fmt - text rendering of stored operation trees.
//!
//! Programs have no source text; this crate produces the closest thing to
//! one, for `arbor show` and the editor's `show` command.
//!
//! ```text
//! function [name: twice, params: x] {
//!     mul [left: $x, right: 2, result: y]
//!     return [value: $y]
//! }
//! call [name: twice, args: 21, result: r]
//! print [value: $r]
//! ```
//!
//! Rendering only reads the store.

mod emitter;
mod tree;

pub use emitter::{Emitter, StringEmitter};
pub use tree::{render, render_into, render_subtree};
