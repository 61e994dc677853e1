use std::error::Error;
use std::fmt;

/// Failure reasons across parsing, compiling, linking and execution.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    Null,
    Overflow,
    UnknownOp,
    UnknownToken,
    UnknownLine,
    DivZero,
    TypeMismatch,
    ParenthMismatch,
    Halted,
    Assignment,
    BlockMismatch,
    ParseInt,
    ParseFloat,
    MissingArgs,
    MissingLabel,
    InvalidID,
    ConstSet,
}

impl ErrorKind {
    /// Fixed user-visible message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Null => "Null variable",
            ErrorKind::Overflow => "Overflow or out of bounds access",
            ErrorKind::UnknownOp => "Unknown operator",
            ErrorKind::UnknownToken => "Unknown token",
            ErrorKind::UnknownLine => "Unknown line formation",
            ErrorKind::DivZero => "Tried to divide by zero",
            ErrorKind::TypeMismatch => "Type mismatch",
            ErrorKind::ParenthMismatch => "Parentheses mismatch",
            ErrorKind::Halted => "Process halted",
            ErrorKind::Assignment => "Cannot assign expression",
            ErrorKind::BlockMismatch => "Block mismatch",
            ErrorKind::ParseInt => "Failed to parse integer",
            ErrorKind::ParseFloat => "Failed to parse float",
            ErrorKind::MissingArgs => "Missing arguments",
            ErrorKind::MissingLabel => "Missing label",
            ErrorKind::InvalidID => "Invalid variable name",
            ErrorKind::ConstSet => "Assigning a constant",
        }
    }
}

/// An error bound to the source line that produced it.
///
/// Note that `Halted` also travels through this type: it marks that the
/// program ran to completion, not that something went wrong. Link-level
/// records that have no meaningful line carry line 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ProgramError {
    pub kind: ErrorKind,
    pub line: usize,
}

impl ProgramError {
    pub fn new(kind: ErrorKind, line: usize) -> ProgramError {
        ProgramError { kind, line }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind.message())
    }
}

impl Error for ProgramError {}
