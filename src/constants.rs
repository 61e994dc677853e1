use std::mem;

pub const OP_BYTES: u32 = mem::size_of::<u32>() as u32;
pub const ARG_BYTES: u32 = mem::size_of::<i32>() as u32;

/// Size of one instruction cell: an opcode word and an argument word.
pub const INSTR_BYTES: u32 = OP_BYTES + ARG_BYTES;

pub const TAG_BYTES: u32 = mem::size_of::<u32>() as u32;
pub const PAYLOAD_BYTES: u32 = 4;

/// Size of one variable cell: a type tag and a payload word.
pub const VAR_BYTES: u32 = TAG_BYTES + PAYLOAD_BYTES;
