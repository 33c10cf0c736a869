//! Program file schema.
//!
//! Applied with `IF NOT EXISTS` on every open, so a file written by an older
//! build or provisioned by hand is brought to the expected shape.

/// DDL for a program file. A fresh file has both tables empty.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS operations (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    opcode    TEXT    NOT NULL,
    parent_id INTEGER NULL REFERENCES operations(id),
    sequence  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS parameters (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    operation_id INTEGER NOT NULL REFERENCES operations(id),
    key          TEXT    NOT NULL,
    value        TEXT    NULL
);

CREATE INDEX IF NOT EXISTS operations_by_parent ON operations(parent_id, sequence);
CREATE INDEX IF NOT EXISTS parameters_by_operation ON parameters(operation_id);
";
