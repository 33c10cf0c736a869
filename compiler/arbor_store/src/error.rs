//! Storage errors.

use std::path::PathBuf;

use arbor_ir::OpId;

/// Result of a store access.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reading or writing a program file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("program file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("program file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("no operation with id {0}")]
    NoSuchOperation(OpId),
}
