//! Arbor IR - program tree types.
//!
//! Arbor programs have no textual source. A program is a tree of operations,
//! each carrying an opcode, an optional parent, a sibling ordering key, and a
//! set of string parameters. This crate holds the plain data for that tree;
//! persistence lives in `arbor_store` and execution in `arbor_eval`.
//!
//! - [`OpId`]: stable identifier assigned by the store
//! - [`Opcode`]: closed set of operation tags, plus `Unknown` for anything else
//! - [`Operation`]: one node of the tree
//! - [`Params`]: the keyed string parameters of one node

mod op_id;
mod opcode;
mod operation;
mod params;

pub use op_id::OpId;
pub use opcode::Opcode;
pub use operation::Operation;
pub use params::Params;
