//! The `edit` command: a line-oriented editor over a program file.
//!
//! Commands, one per line:
//!
//! ```text
//! show                      render the program
//! add <parent|root> <op>    append an operation, print its id
//! set <id> <key> <value>    set a parameter (value is the rest of the line)
//! delete <id>               delete an operation and everything under it
//! reseq <parent|root>       renumber siblings 1..n
//! help                      list commands
//! quit | exit               end the session
//! ```
//!
//! A bad command prints `error: ...` and the session carries on. End of
//! input ends the session.

use std::io::{BufRead, Write};
use std::path::Path;

use arbor_ir::{OpId, Opcode};
use arbor_store::Store;

use crate::{CommandError, CommandResult};

const PROMPT: &str = "arbor> ";

const HELP: &str = "\
commands:
  show                      render the program
  add <parent|root> <op>    append an operation, print its id
  set <id> <key> <value>    set a parameter (value is the rest of the line)
  delete <id>               delete an operation and its descendants
  reseq <parent|root>       renumber siblings 1..n
  help                      show this list
  quit, exit                end the session
";

/// Whether the session continues after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Open `path` and edit it interactively on stdin/stdout.
pub fn edit_file(path: &Path) -> CommandResult<()> {
    let mut store = Store::open(path)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Editor::new(&mut store).session(stdin.lock(), stdout.lock())
}

/// Editor state: the store being edited.
pub struct Editor<'s> {
    store: &'s mut Store,
}

impl<'s> Editor<'s> {
    pub fn new(store: &'s mut Store) -> Self {
        Editor { store }
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// Only failures writing to `output` or reading `input` end the session
    /// with an error.
    pub fn session<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> CommandResult<()> {
        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes())?;
            output.flush()?;
            let Some(line) = lines.next() else {
                writeln!(output)?;
                return Ok(());
            };
            let line = line?;
            match self.execute(&line, &mut output) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(CommandError::Io(err)) => return Err(CommandError::Io(err)),
                Err(err) => writeln!(output, "error: {err}")?,
            }
        }
    }

    /// Run one command line.
    pub fn execute<W: Write>(&mut self, line: &str, output: &mut W) -> CommandResult<Flow> {
        let Some((command, rest)) = next_word(line) else {
            return Ok(Flow::Continue);
        };
        tracing::debug!(command, "editor command");
        match command {
            "show" => {
                let text = arbor_fmt::render(&*self.store)?;
                if text.is_empty() {
                    writeln!(output, "(empty program)")?;
                } else {
                    output.write_all(text.as_bytes())?;
                }
            }
            "add" => {
                let (parent, rest) = next_word(rest).ok_or_else(|| missing("add", "parent"))?;
                let (opcode, _) = next_word(rest).ok_or_else(|| missing("add", "opcode"))?;
                let parent = parse_parent(parent)?;
                let id = self.store.append(&Opcode::parse(opcode), parent)?;
                writeln!(output, "{id}")?;
            }
            "set" => {
                let (id, rest) = next_word(rest).ok_or_else(|| missing("set", "id"))?;
                let (key, value) = next_word(rest).ok_or_else(|| missing("set", "key"))?;
                if value.is_empty() {
                    return Err(missing("set", "value"));
                }
                self.store.set_parameter(parse_id(id)?, key, value)?;
            }
            "delete" => {
                let (id, _) = next_word(rest).ok_or_else(|| missing("delete", "id"))?;
                let removed = self.store.delete_subtree(parse_id(id)?)?;
                writeln!(output, "deleted {removed} operation(s)")?;
            }
            "reseq" => {
                let (parent, _) = next_word(rest).ok_or_else(|| missing("reseq", "parent"))?;
                let count = self.store.resequence(parse_parent(parent)?)?;
                writeln!(output, "resequenced {count} operation(s)")?;
            }
            "help" => output.write_all(HELP.as_bytes())?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        }
        Ok(Flow::Continue)
    }
}

/// Split off the first whitespace-delimited word.
///
/// The remainder keeps its text as written, minus the single separator.
fn next_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(end) => {
            let (word, rest) = text.split_at(end);
            let separator = rest.chars().next().map_or(0, char::len_utf8);
            Some((word, &rest[separator..]))
        }
        None => Some((text, "")),
    }
}

fn parse_id(text: &str) -> CommandResult<OpId> {
    text.parse()
        .map_err(|_| CommandError::InvalidId(text.to_string()))
}

fn parse_parent(text: &str) -> CommandResult<Option<OpId>> {
    if text == "root" {
        Ok(None)
    } else {
        parse_id(text).map(Some)
    }
}

#[cold]
fn missing(command: &'static str, argument: &'static str) -> CommandError {
    CommandError::MissingArgument { command, argument }
}
