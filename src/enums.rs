use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Operator set of the virtual machine.
///
/// The declaration order is load-bearing: the discriminant is the on-image
/// encoding of an instruction's opcode word and the index into the keyword
/// table behind [`name`](#method.name).
///
/// The first groups double as the reserved keywords of the source language;
/// `LoadData`, `LoadVar`, `AddStack` and `Nop` are internal and cannot be
/// written by name in a program.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum Opcode {
    // Program control
    If,
    Elif,
    Else,
    For,
    While,
    End,
    Pause,
    Label,
    Goto,
    Exec,
    Return,
    Halt,

    // Program I/O
    Input,
    Disp,
    Output,
    GetKey,
    Clear,

    // Misc.
    Func,
    Set,

    // Arithmetic (consume the two topmost stack cells)
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Greater,
    GreaterEq,
    Less,
    LessEq,

    // Boolean
    Not,
    And,
    Or,

    // Hidden internal ops
    LoadData,
    LoadVar,
    AddStack,
    Nop,
}

pub const OPCODE_COUNT: usize = 37;

const OPCODE_NAMES: [&str; OPCODE_COUNT] = [
    "if", "elif", "else", "for", "while", "end", "pause", "label", "goto",
    "exec", "return", "halt", "input", "disp", "output", "getKey", "clear",
    "func", "=", "+", "-", "*", "/", "%", "==", "!=", ">", ">=", "<", "<=",
    "!", "and", "or", "loaddata", "loadvar", "addstack", "nop",
];

impl Opcode {
    /// The keyword or symbol this opcode is written as in source programs.
    pub fn name(self) -> &'static str {
        OPCODE_NAMES[self as usize]
    }
}

impl FromStr for Opcode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Opcode, ParseEnumError> {
        OPCODE_NAMES
            .iter()
            .position(|&name| name == s)
            .and_then(Opcode::from_usize)
            .ok_or_else(|| ParseEnumError {
                value: s.to_string(),
                enum_name: "Opcode",
            })
    }
}

/// Cooperative suspension requests raised by the I/O opcodes.
///
/// The machine only ever moves the state away from `None`; the host moves it
/// back by calling [`Machine::release_interrupt`](struct.Machine.html#method.release_interrupt).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Interrupt {
    None,
    Pause,
    GetKey,
    Input,
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl fmt::Display for $e {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(Opcode);
impl_enum_display!(Interrupt);

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseEnumError {
    pub value: String,
    pub enum_name: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Failed to parse \"{}\" as {}.",
            &self.value, &self.enum_name
        )
    }
}

impl Error for ParseEnumError {}
