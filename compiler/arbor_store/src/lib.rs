//! Arbor Store - durable program trees.
//!
//! A program file is a SQLite database holding two tables: `operations`
//! (the tree) and `parameters` (keyed strings owned by an operation). The
//! interpreter only reads through [`Store::children_of`] and
//! [`Store::parameters_of`]; the editor additionally creates, updates,
//! deletes and renumbers nodes.

mod error;
mod schema;
mod store;

pub use error::{StoreError, StoreResult};
pub use schema::SCHEMA;
pub use store::Store;

// Re-export the tree types so collaborators can depend on the store alone.
pub use arbor_ir::{OpId, Opcode, Operation, Params};
