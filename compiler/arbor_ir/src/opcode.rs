//! Operation tags.
//!
//! The opcode set is closed: every known tag has a variant, and anything else
//! read from storage becomes [`Opcode::Unknown`] carrying the original text.
//! Unknown opcodes round-trip through the store unchanged and are skipped by
//! the interpreter.

use std::fmt;
use std::str::FromStr;

/// The tag identifying an operation's semantics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Assign,
    Print,
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
    Gt,
    If,
    Else,
    While,
    For,
    /// Reserved; accepted by the store but has no runtime effect.
    Break,
    /// Reserved; accepted by the store but has no runtime effect.
    Continue,
    Return,
    Function,
    Call,
    /// Any tag outside the known set, kept verbatim.
    Unknown(String),
}

impl Opcode {
    /// Every known opcode, in glossary order.
    pub const KNOWN: [Opcode; 18] = [
        Opcode::Assign,
        Opcode::Print,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Eq,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::If,
        Opcode::Else,
        Opcode::While,
        Opcode::For,
        Opcode::Break,
        Opcode::Continue,
        Opcode::Return,
        Opcode::Function,
        Opcode::Call,
    ];

    /// Parse a stored tag. Never fails: unrecognized text maps to `Unknown`.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "assign" => Opcode::Assign,
            "print" => Opcode::Print,
            "add" => Opcode::Add,
            "sub" => Opcode::Sub,
            "mul" => Opcode::Mul,
            "div" => Opcode::Div,
            "eq" => Opcode::Eq,
            "lt" => Opcode::Lt,
            "gt" => Opcode::Gt,
            "if" => Opcode::If,
            "else" => Opcode::Else,
            "while" => Opcode::While,
            "for" => Opcode::For,
            "break" => Opcode::Break,
            "continue" => Opcode::Continue,
            "return" => Opcode::Return,
            "function" => Opcode::Function,
            "call" => Opcode::Call,
            other => Opcode::Unknown(other.to_string()),
        }
    }

    /// The tag as stored.
    pub fn as_str(&self) -> &str {
        match self {
            Opcode::Assign => "assign",
            Opcode::Print => "print",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Eq => "eq",
            Opcode::Lt => "lt",
            Opcode::Gt => "gt",
            Opcode::If => "if",
            Opcode::Else => "else",
            Opcode::While => "while",
            Opcode::For => "for",
            Opcode::Break => "break",
            Opcode::Continue => "continue",
            Opcode::Return => "return",
            Opcode::Function => "function",
            Opcode::Call => "call",
            Opcode::Unknown(tag) => tag,
        }
    }

    /// Whether this tag belongs to the known opcode set.
    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, Opcode::Unknown(_))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Opcode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Opcode::parse(s))
    }
}

impl From<&str> for Opcode {
    fn from(tag: &str) -> Self {
        Opcode::parse(tag)
    }
}
