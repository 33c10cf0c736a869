//! The operation store.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{StoreError, StoreResult};
use crate::schema::SCHEMA;
use arbor_ir::{OpId, Opcode, Operation, Params};

const SELECT_OPERATION: &str = "SELECT id, opcode, parent_id, sequence FROM operations";

/// A program tree persisted in SQLite.
///
/// Reads take `&self`; structural edits that touch several rows
/// (`delete_subtree`, `resequence`) take `&mut self` and run in a transaction.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open an existing program file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "opening program file");
        Self::with_connection(Connection::open(path)?)
    }

    /// Provision a fresh, empty program file.
    pub fn create(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Err(StoreError::AlreadyExists(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "creating program file");
        Self::with_connection(Connection::open(path)?)
    }

    /// An empty store that lives only as long as the value.
    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Store { conn })
    }

    // Reads

    /// Children of `parent` (root operations for `None`), by ascending
    /// `sequence`, ties broken by id.
    pub fn children_of(&self, parent: Option<OpId>) -> StoreResult<Vec<Operation>> {
        children_of(&self.conn, parent)
    }

    /// The first child of `parent` carrying `opcode`, in sibling order.
    pub fn first_child_with(
        &self,
        parent: OpId,
        opcode: &Opcode,
    ) -> StoreResult<Option<Operation>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "{SELECT_OPERATION} WHERE parent_id = ?1 AND opcode = ?2 \
             ORDER BY sequence, id LIMIT 1"
        ))?;
        let found = stmt
            .query_row(params![parent.raw(), opcode.as_str()], operation_from_row)
            .optional()?;
        Ok(found)
    }

    /// Parameters of `id`. On duplicate keys the first inserted row wins.
    pub fn parameters_of(&self, id: OpId) -> StoreResult<Params> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT key, value FROM parameters WHERE operation_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([id.raw()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?;
        let mut params = Params::new();
        for row in rows {
            let (key, value) = row?;
            params.push(key, value);
        }
        Ok(params)
    }

    /// A single operation, if it exists.
    pub fn operation(&self, id: OpId) -> StoreResult<Option<Operation>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_OPERATION} WHERE id = ?1"))?;
        let found = stmt.query_row([id.raw()], operation_from_row).optional()?;
        Ok(found)
    }

    /// Total number of stored operations.
    pub fn operation_count(&self) -> StoreResult<usize> {
        count(&self.conn, "SELECT COUNT(*) FROM operations")
    }

    /// Total number of stored parameter rows.
    pub fn parameter_count(&self) -> StoreResult<usize> {
        count(&self.conn, "SELECT COUNT(*) FROM parameters")
    }

    // Writes

    /// Create an operation with an explicit sequence number.
    pub fn create_operation(
        &self,
        opcode: &Opcode,
        parent: Option<OpId>,
        sequence: i64,
    ) -> StoreResult<OpId> {
        if let Some(parent) = parent {
            self.require(parent)?;
        }
        self.conn.execute(
            "INSERT INTO operations (opcode, parent_id, sequence) VALUES (?1, ?2, ?3)",
            params![opcode.as_str(), parent.map(OpId::raw), sequence],
        )?;
        let id = OpId::new(self.conn.last_insert_rowid());
        tracing::trace!(%id, %opcode, ?parent, sequence, "created operation");
        Ok(id)
    }

    /// Create an operation after the last existing sibling.
    pub fn append(&self, opcode: &Opcode, parent: Option<OpId>) -> StoreResult<OpId> {
        let next: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(sequence), 0) + 1 FROM operations WHERE parent_id IS ?1",
            [parent.map(OpId::raw)],
            |row| row.get(0),
        )?;
        self.create_operation(opcode, parent, next)
    }

    /// Set `key` on `id`: overwrites the first existing row for `key`,
    /// inserting one if none exists.
    pub fn set_parameter(&self, id: OpId, key: &str, value: &str) -> StoreResult<()> {
        self.require(id)?;
        let updated = self.conn.execute(
            "UPDATE parameters SET value = ?3 WHERE id = (\
                 SELECT id FROM parameters WHERE operation_id = ?1 AND key = ?2 \
                 ORDER BY id LIMIT 1)",
            params![id.raw(), key, value],
        )?;
        if updated == 0 {
            self.insert_parameter(id, key, Some(value))?;
        }
        Ok(())
    }

    /// Insert a parameter row unconditionally, even if `key` already exists.
    pub fn add_parameter(&self, id: OpId, key: &str, value: Option<&str>) -> StoreResult<()> {
        self.require(id)?;
        self.insert_parameter(id, key, value)
    }

    fn insert_parameter(&self, id: OpId, key: &str, value: Option<&str>) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO parameters (operation_id, key, value) VALUES (?1, ?2, ?3)",
            params![id.raw(), key, value],
        )?;
        Ok(())
    }

    /// Delete `id`, all of its descendants and every parameter they own.
    ///
    /// Returns the number of operations removed.
    pub fn delete_subtree(&mut self, id: OpId) -> StoreResult<usize> {
        self.require(id)?;
        let tx = self.conn.transaction()?;
        let removed = delete_recursive(&tx, id)?;
        tx.commit()?;
        tracing::debug!(%id, removed, "deleted subtree");
        Ok(removed)
    }

    /// Renumber the children of `parent` to `1..=n`, keeping their order.
    pub fn resequence(&mut self, parent: Option<OpId>) -> StoreResult<usize> {
        if let Some(parent) = parent {
            self.require(parent)?;
        }
        let tx = self.conn.transaction()?;
        let children = children_of(&tx, parent)?;
        for (sequence, child) in (1_i64..).zip(&children) {
            tx.execute(
                "UPDATE operations SET sequence = ?2 WHERE id = ?1",
                params![child.id.raw(), sequence],
            )?;
        }
        tx.commit()?;
        tracing::debug!(?parent, count = children.len(), "resequenced siblings");
        Ok(children.len())
    }

    fn require(&self, id: OpId) -> StoreResult<()> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM operations WHERE id = ?1)",
            [id.raw()],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(StoreError::NoSuchOperation(id))
        }
    }
}

fn children_of(conn: &Connection, parent: Option<OpId>) -> StoreResult<Vec<Operation>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_OPERATION} WHERE parent_id IS ?1 ORDER BY sequence, id"
    ))?;
    let rows = stmt.query_map([parent.map(OpId::raw)], operation_from_row)?;
    let operations = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(operations)
}

fn delete_recursive(conn: &Connection, id: OpId) -> StoreResult<usize> {
    let mut removed = 0;
    for child in children_of(conn, Some(id))? {
        removed += delete_recursive(conn, child.id)?;
    }
    conn.execute("DELETE FROM parameters WHERE operation_id = ?1", [id.raw()])?;
    conn.execute("DELETE FROM operations WHERE id = ?1", [id.raw()])?;
    Ok(removed + 1)
}

fn count(conn: &Connection, sql: &str) -> StoreResult<usize> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(usize::try_from(n).unwrap_or_default())
}

fn operation_from_row(row: &Row<'_>) -> rusqlite::Result<Operation> {
    let opcode: String = row.get(1)?;
    Ok(Operation {
        id: OpId::new(row.get(0)?),
        opcode: Opcode::parse(&opcode),
        parent: row.get::<_, Option<i64>>(2)?.map(OpId::new),
        sequence: row.get(3)?,
    })
}
