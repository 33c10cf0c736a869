//! The `show` command: render a program file as text.

use std::path::Path;

use arbor_store::Store;

use crate::CommandResult;

pub fn show_file(path: &Path) -> CommandResult<String> {
    let store = Store::open(path)?;
    Ok(arbor_fmt::render(&store)?)
}
