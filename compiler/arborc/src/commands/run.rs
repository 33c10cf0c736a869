//! The `run` command: execute a program file.

use std::path::Path;

use arbor_eval::{stdout_sink, EvalMode, InterpreterBuilder, ReturnMode, SharedOutput};
use arbor_store::Store;

use crate::{CommandError, CommandResult};

/// Options accepted by `arbor run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Bound on `call` nesting (`--max-depth=<n>`).
    pub max_depth: Option<usize>,
    /// Let `return` unwind nested bodies (`--unwind-returns`).
    pub unwind_returns: bool,
}

/// Parse the flags following `arbor run <file>`.
pub fn parse_run_options(args: &[String]) -> CommandResult<RunOptions> {
    let mut options = RunOptions::default();
    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse()
                .map_err(|_| CommandError::InvalidOption(arg.clone()))?;
            options.max_depth = Some(depth);
        } else if arg == "--unwind-returns" {
            options.unwind_returns = true;
        } else {
            return Err(CommandError::InvalidOption(arg.clone()));
        }
    }
    Ok(options)
}

/// Run the program in `path`, printing to stdout.
pub fn run_file(path: &Path, options: &RunOptions) -> CommandResult<()> {
    run_with_output(path, options, stdout_sink())
}

/// Run the program in `path` with `print` going to `output`.
pub fn run_with_output(
    path: &Path,
    options: &RunOptions,
    output: SharedOutput,
) -> CommandResult<()> {
    let store = Store::open(path)?;
    let mut builder = InterpreterBuilder::new(&store)
        .mode(EvalMode::Interpret)
        .output(output);
    if let Some(depth) = options.max_depth {
        builder = builder.max_call_depth(depth);
    }
    if options.unwind_returns {
        builder = builder.return_mode(ReturnMode::Unwind);
    }
    builder.build().run()?;
    Ok(())
}
