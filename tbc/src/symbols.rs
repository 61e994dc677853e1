use tbvm::{Instruction, Opcode, VAR_BYTES};

use crate::ast::{LexNode, Symbol};

/// A literal awaiting placement in the static-data segment. Strings keep
/// their text here; the linker copies the bytes into the image tail and
/// rewrites the cell to an offset.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Int(i32),
    Float(f32),
    Bool(bool),
    Str(String),
}

/// A `goto` waiting for its label, by instruction index.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PendingJump {
    pub index: usize,
    pub label: String,
    pub line: usize,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LabelDef {
    pub name: String,
    pub index: usize,
}

/// An open control block awaiting its `end`.
///
/// `patch` is the index of the conditional placeholder whose jump argument is
/// still unset; `exits` collects the jumps that leave the block when `end` is
/// reached. Indices are used instead of instruction references so patching is
/// plain indexed mutation while the instruction list keeps growing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OpenBlock {
    pub symbol: Symbol,
    pub line: usize,
    pub head: usize,
    pub patch: Option<usize>,
    pub exits: Vec<usize>,
}

/// Shared scratch space of the parser and compiler: the per-line lexical
/// trees plus everything code emission accumulates. The linker consumes it.
pub struct SymbolTable {
    pub lex_tree: Vec<LexNode>,
    pub block_depth: usize,

    pub instructions: Vec<Instruction>,
    pub data: Vec<Literal>,
    pub variables: Vec<String>,
    pub jumps: Vec<PendingJump>,
    pub labels: Vec<LabelDef>,
    pub blocks: Vec<OpenBlock>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            lex_tree: Vec::new(),
            block_depth: 0,
            instructions: Vec::new(),
            data: Vec::new(),
            variables: Vec::new(),
            jumps: Vec::new(),
            labels: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Appends an instruction and returns its index for later patching.
    pub fn emit(&mut self, op: Opcode, arg: i32) -> usize {
        self.instructions.push(Instruction::new(op, arg));
        self.instructions.len() - 1
    }

    /// Places a literal in the static-data list and emits the load for it.
    pub fn load_literal(&mut self, literal: Literal) {
        let index = self.data.len();
        self.data.push(literal);
        self.emit(Opcode::LoadData, index as i32 * VAR_BYTES as i32);
    }

    /// Emits the L-value load for a named variable, assigning a frame slot on
    /// first sight. Slot order is first-seen order; the offset is negative
    /// because the frame sits just below the stack base.
    pub fn load_variable(&mut self, name: &str) {
        let slot = match self.variables.iter().position(|v| v == name) {
            Some(slot) => slot,
            None => {
                self.variables.push(name.to_string());
                self.variables.len() - 1
            }
        };
        self.emit(Opcode::LoadVar, -((slot as i32 + 1) * VAR_BYTES as i32));
    }
}
