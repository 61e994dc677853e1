pub mod constants;

mod enums;
mod error;
mod instruction;
mod machine;
mod memory;
mod variable;


pub use crate::constants::{INSTR_BYTES, VAR_BYTES};
pub use crate::enums::{Interrupt, Opcode, ParseEnumError};
pub use crate::error::{ErrorKind, ProgramError};
pub use crate::instruction::Instruction;
pub use crate::machine::{Layout, Machine};
pub use crate::memory::{Memory, Storage};
pub use crate::variable::{is_boolean, is_float, is_integer, Variable};

/// Byte order for every multi-byte value in a machine image.
pub type Endian = byteorder::LittleEndian;
