//! The `new` command: provision an empty program file.

use std::path::Path;

use arbor_store::Store;

use crate::CommandResult;

/// Create `path` as an empty program. Fails if the file already exists.
pub fn new_program(path: &Path) -> CommandResult<()> {
    Store::create(path)?;
    tracing::debug!(path = %path.display(), "new program");
    Ok(())
}
