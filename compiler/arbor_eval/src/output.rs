//! Output sink for the `print` opcode.
//!
//! - `Stdout`: writes each line to standard output (`arbor run`)
//! - `Buffer`: captures output for tests and tooling
//! - `Discard`: drops everything
//!
//! Enum dispatch rather than a trait object: the set of sinks is closed and
//! `print` sits on the interpreter's hot path.

use std::sync::Arc;

use parking_lot::Mutex;

/// Destination for program output.
pub enum OutputSink {
    Stdout,
    Buffer(Mutex<String>),
    Discard,
}

/// Sink shared between an interpreter and whoever inspects its output.
pub type SharedOutput = Arc<OutputSink>;

impl OutputSink {
    /// Write one line.
    pub fn emit_line(&self, text: &str) {
        match self {
            Self::Stdout => println!("{text}"),
            Self::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(text);
                buf.push('\n');
            }
            Self::Discard => {}
        }
    }

    /// Everything captured so far. Empty for sinks that do not capture.
    pub fn captured(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.lock().clone(),
            Self::Stdout | Self::Discard => String::new(),
        }
    }

    /// Forget captured output.
    pub fn clear(&self) {
        if let Self::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

pub fn stdout_sink() -> SharedOutput {
    Arc::new(OutputSink::Stdout)
}

pub fn buffer_sink() -> SharedOutput {
    Arc::new(OutputSink::Buffer(Mutex::new(String::new())))
}

pub fn discard_sink() -> SharedOutput {
    Arc::new(OutputSink::Discard)
}
