//! Tree rendering.
//!
//! One node per line: `opcode [key: value, ...] {`, children indented one
//! level, then a closing `}`. The parameter list is left out when a node has
//! no parameters and the braces when it has no children. A stored `NULL`
//! renders as `null`.

use arbor_ir::{OpId, Operation};
use arbor_store::{Store, StoreError, StoreResult};

use crate::emitter::{Emitter, StringEmitter};

/// Render the whole program. An empty program renders as `""`.
pub fn render(store: &Store) -> StoreResult<String> {
    let mut emitter = StringEmitter::new();
    render_into(store, &mut emitter)?;
    Ok(emitter.output())
}

/// Render one operation and its descendants.
pub fn render_subtree(store: &Store, id: OpId) -> StoreResult<String> {
    let op = store
        .operation(id)?
        .ok_or(StoreError::NoSuchOperation(id))?;
    let mut emitter = StringEmitter::new();
    render_node(store, &op, 0, &mut emitter)?;
    Ok(emitter.output())
}

/// Render the whole program into any emitter.
pub fn render_into<E: Emitter>(store: &Store, emitter: &mut E) -> StoreResult<()> {
    for op in store.children_of(None)? {
        render_node(store, &op, 0, emitter)?;
    }
    Ok(())
}

fn render_node<E: Emitter>(
    store: &Store,
    op: &Operation,
    level: usize,
    emitter: &mut E,
) -> StoreResult<()> {
    emitter.emit_indent(level);
    emitter.emit(op.opcode.as_str());

    let params = store.parameters_of(op.id)?;
    if !params.is_empty() {
        emitter.emit(" [");
        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                emitter.emit(", ");
            }
            emitter.emit(key);
            emitter.emit(": ");
            emitter.emit(value.unwrap_or("null"));
        }
        emitter.emit("]");
    }

    let children = store.children_of(Some(op.id))?;
    if children.is_empty() {
        emitter.emit_newline();
        return Ok(());
    }
    emitter.emit(" {");
    emitter.emit_newline();
    for child in &children {
        render_node(store, child, level + 1, emitter)?;
    }
    emitter.emit_indent(level);
    emitter.emit("}");
    emitter.emit_newline();
    Ok(())
}
