//! Program tree nodes.

use crate::{OpId, Opcode};

/// One node of a stored program tree.
///
/// `parent == None` marks a root-level operation. `sequence` orders siblings
/// and is not required to be contiguous.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    pub id: OpId,
    pub opcode: Opcode,
    pub parent: Option<OpId>,
    pub sequence: i64,
}
