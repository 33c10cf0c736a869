//! Command handlers for the `arbor` CLI.
//!
//! Each submodule implements one command. Handlers take paths and streams
//! rather than touching the process directly, and report failures as
//! [`CommandError`](crate::CommandError)s for `main` to print.

mod edit;
mod new;
mod run;
mod show;

pub use edit::{edit_file, Editor, Flow};
pub use new::new_program;
pub use run::{parse_run_options, run_file, run_with_output, RunOptions};
pub use show::show_file;
