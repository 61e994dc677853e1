//! The linker: resolves named jumps, wraps the code in its stack prologue and
//! halt epilogue, and lays the instruction and data lists out as image bytes.

use log::debug;
use tbvm::{
    ErrorKind, Instruction, Layout, Opcode, ProgramError, Variable, INSTR_BYTES, VAR_BYTES,
};
use tbx::Program;

use crate::parser::raise;
use crate::symbols::{Literal, SymbolTable};

pub(crate) fn link(mut table: SymbolTable, errors: &mut Vec<ProgramError>) -> Program {
    // Named jumps resolve before the prologue shifts any indices; the
    // resulting arguments are relative, so the shift cannot disturb them.
    for jump in &table.jumps {
        // The first definition of a duplicated label wins.
        match table.labels.iter().find(|label| label.name == jump.label) {
            Some(label) => {
                table.instructions[jump.index].arg = label.index as i32 - jump.index as i32;
            }
            None => raise(errors, ErrorKind::MissingLabel, jump.line),
        }
    }

    // Reserve the local frame at startup, and make normal termination
    // explicit.
    let locals = table.variables.len();
    if locals > 0 {
        table.instructions.insert(
            0,
            Instruction::new(Opcode::AddStack, -(locals as i32 * VAR_BYTES as i32)),
        );
    }
    table.instructions.push(Instruction::new(Opcode::Halt, 0));

    let code_len = table.instructions.len() * INSTR_BYTES as usize;
    let data_len = table.data.len() * VAR_BYTES as usize;
    let string_len: usize = table
        .data
        .iter()
        .map(|literal| match literal {
            Literal::Str(text) => text.len() + 1,
            _ => 0,
        })
        .sum();

    let mut image = vec![0u8; code_len + data_len + string_len];
    for (i, instruction) in table.instructions.iter().enumerate() {
        instruction.encode(&mut image[i * INSTR_BYTES as usize..][..INSTR_BYTES as usize]);
    }

    // Data cells first, then the string bytes they reference; each string is
    // NUL-terminated and its cell holds the data-relative byte offset.
    let mut string_pos = code_len + data_len;
    for (i, literal) in table.data.iter().enumerate() {
        let cell = match literal {
            Literal::Int(v) => Variable::Int(*v),
            Literal::Float(v) => Variable::Float(*v),
            Literal::Bool(v) => Variable::Bool(*v),
            Literal::Str(text) => {
                let relative = (string_pos - code_len) as i32;
                image[string_pos..string_pos + text.len()].copy_from_slice(text.as_bytes());
                string_pos += text.len() + 1;
                Variable::Str(relative)
            }
        };
        cell.encode(&mut image[code_len + i * VAR_BYTES as usize..][..VAR_BYTES as usize]);
    }

    debug!(
        "linked {} instruction cells, {} data cells, {} string bytes",
        table.instructions.len(),
        table.data.len(),
        string_len
    );

    Program::from(
        Layout {
            data_var_count: table.data.len() as u32,
            data_pointer: code_len as u32,
            heap_pointer: (code_len + data_len + string_len) as u32,
        },
        image,
    )
}
