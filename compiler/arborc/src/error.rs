//! Errors surfaced by CLI commands.

use arbor_eval::EvalError;
use arbor_store::StoreError;

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("runtime error: {0}")]
    Eval(#[from] EvalError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid option '{0}'")]
    InvalidOption(String),

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{0}' is not an operation id")]
    InvalidId(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}
