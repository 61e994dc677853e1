use byteorder::ByteOrder;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::constants::{INSTR_BYTES, OP_BYTES};
use crate::{Endian, Opcode};

/// One instruction cell: an opcode and its signed argument.
///
/// The meaning of `arg` depends on the opcode: a jump displacement in
/// instruction cells, a stack delta in bytes, a data-segment byte offset, a
/// negative frame-slot byte offset, or the current source line for `Nop`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub op: Opcode,
    pub arg: i32,
}

impl Instruction {
    pub fn new(op: Opcode, arg: i32) -> Instruction {
        Instruction { op, arg }
    }

    /// Writes the cell into `buf`, which must hold at least
    /// [`INSTR_BYTES`](constants/constant.INSTR_BYTES.html) bytes.
    pub fn encode(self, buf: &mut [u8]) {
        Endian::write_u32(&mut buf[..OP_BYTES as usize], enum_to_u32(self.op));
        Endian::write_i32(&mut buf[OP_BYTES as usize..INSTR_BYTES as usize], self.arg);
    }

    /// Reads a cell back out of `buf`, or `None` if the opcode word does not
    /// name a known opcode.
    pub fn decode(buf: &[u8]) -> Option<Instruction> {
        let op = Opcode::from_u32(Endian::read_u32(&buf[..OP_BYTES as usize]))?;
        let arg = Endian::read_i32(&buf[OP_BYTES as usize..INSTR_BYTES as usize]);
        Some(Instruction { op, arg })
    }
}

#[inline]
fn enum_to_u32<T: ToPrimitive>(val: T) -> u32 {
    ToPrimitive::to_u32(&val).unwrap()
}
