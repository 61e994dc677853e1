//! Code emission: post-order traversal of each line's lexical tree into the
//! symbol table's instruction, data and variable lists, patching block jumps
//! as `elif`/`else`/`end` close the open constructs.

use log::debug;
use matches::debug_assert_matches;
use tbvm::{ErrorKind, Opcode, ProgramError};

use crate::ast::{arg_count, LexNode, NodeKind, Symbol, Terminal};
use crate::parser::raise;
use crate::symbols::{LabelDef, Literal, OpenBlock, PendingJump, SymbolTable};

/// Built-in functions: source name, arity, opcode.
pub(crate) const FUNCTIONS: [(&str, usize, Opcode); 7] = [
    ("input", 0, Opcode::Input),
    ("disp", 1, Opcode::Disp),
    ("output", 3, Opcode::Output),
    ("getKey", 0, Opcode::GetKey),
    ("clear", 0, Opcode::Clear),
    ("pause", 0, Opcode::Pause),
    ("halt", 0, Opcode::Halt),
];

pub(crate) fn is_function_name(name: &str) -> bool {
    FUNCTIONS.iter().any(|(fname, _, _)| *fname == name)
}

/// Emits code for every parsed line. Each line opens with a `Nop` carrying
/// its source line number as a runtime debug anchor.
pub(crate) fn emit_program(table: &mut SymbolTable, errors: &mut Vec<ProgramError>) {
    let lines = std::mem::replace(&mut table.lex_tree, Vec::new());
    for node in &lines {
        table.emit(Opcode::Nop, node.line as i32);
        build_node(table, node, errors);
    }

    // Anything still open never met its `end`.
    if let Some(block) = table.blocks.last() {
        raise(errors, ErrorKind::BlockMismatch, block.line);
        table.blocks.clear();
    }

    debug!(
        "emitted {} instructions, {} data cells, {} variables",
        table.instructions.len(),
        table.data.len(),
        table.variables.len()
    );
}

/// Post-order: left and right push operands, middle carries the condition or
/// argument list, then the node itself emits.
fn build_node(table: &mut SymbolTable, node: &LexNode, errors: &mut Vec<ProgramError>) {
    match &node.kind {
        NodeKind::Symbol(symbol) => build_symbol(table, node, *symbol, errors),
        NodeKind::Terminal(terminal) => build_terminal(table, node, terminal, errors),
    }
}

fn build_children(table: &mut SymbolTable, node: &LexNode, errors: &mut Vec<ProgramError>) {
    if let Some(left) = &node.left {
        build_node(table, left, errors);
    }
    if let Some(right) = &node.right {
        build_node(table, right, errors);
    }
    if let Some(middle) = &node.middle {
        build_node(table, middle, errors);
    }
}

fn build_middle(table: &mut SymbolTable, node: &LexNode, errors: &mut Vec<ProgramError>) {
    if let Some(middle) = &node.middle {
        build_node(table, middle, errors);
    }
}

fn build_terminal(
    table: &mut SymbolTable,
    node: &LexNode,
    terminal: &Terminal,
    errors: &mut Vec<ProgramError>,
) {
    match terminal {
        Terminal::Int(v) => table.load_literal(Literal::Int(*v)),
        Terminal::Float(v) => table.load_literal(Literal::Float(*v)),
        Terminal::Bool(v) => table.load_literal(Literal::Bool(*v)),
        Terminal::StringLit(text) => table.load_literal(Literal::Str(text.clone())),
        Terminal::Variable(name) => table.load_variable(name),

        Terminal::Op(op) => {
            // Negation has no left operand; load an implicit zero underneath
            // so the subtraction computes 0 - x.
            if *op == Opcode::Sub && node.left.is_none() && node.right.is_some() {
                table.load_literal(Literal::Int(0));
            }
            build_children(table, node, errors);
            table.emit(*op, 0);
        }

        Terminal::Function(name) => {
            build_children(table, node, errors);
            let arity = node.middle.as_ref().map_or(0, |list| arg_count(list));
            match FUNCTIONS
                .iter()
                .find(|(fname, farity, _)| *fname == name.as_str() && *farity == arity)
            {
                Some((_, _, op)) => {
                    table.emit(*op, 0);
                }
                None => raise(errors, ErrorKind::InvalidID, node.line),
            }
        }
    }
}

fn build_symbol(
    table: &mut SymbolTable,
    node: &LexNode,
    symbol: Symbol,
    errors: &mut Vec<ProgramError>,
) {
    match symbol {
        Symbol::None => {}

        Symbol::Declaration | Symbol::Expression | Symbol::ExpressionList => {
            build_children(table, node, errors)
        }

        Symbol::If => {
            build_middle(table, node, errors);
            let patch = table.emit(Opcode::If, 0);
            table.blocks.push(OpenBlock {
                symbol: Symbol::If,
                line: node.line,
                head: patch,
                patch: Some(patch),
                exits: Vec::new(),
            });
        }

        Symbol::Elif => {
            let top = match open_conditional(table) {
                Some(top) => top,
                None => {
                    raise(errors, ErrorKind::BlockMismatch, node.line);
                    return;
                }
            };
            // Close the previous arm: it exits to the block end, and the
            // previous conditional falls through to this condition instead.
            let exit = table.emit(Opcode::Goto, 0);
            let here = table.instructions.len();
            match table.blocks[top].patch {
                Some(patch) => table.instructions[patch].arg = (here - patch) as i32,
                None => {
                    // elif after else
                    raise(errors, ErrorKind::BlockMismatch, node.line);
                    return;
                }
            }
            table.blocks[top].exits.push(exit);

            build_middle(table, node, errors);
            let patch = table.emit(Opcode::If, 0);
            let top = table.blocks.len() - 1;
            table.blocks[top].patch = Some(patch);
            table.blocks[top].symbol = Symbol::Elif;
        }

        Symbol::Else => {
            let top = match open_conditional(table) {
                Some(top) => top,
                None => {
                    raise(errors, ErrorKind::BlockMismatch, node.line);
                    return;
                }
            };
            let exit = table.emit(Opcode::Goto, 0);
            let here = table.instructions.len();
            match table.blocks[top].patch {
                Some(patch) => table.instructions[patch].arg = (here - patch) as i32,
                None => {
                    raise(errors, ErrorKind::BlockMismatch, node.line);
                    return;
                }
            }
            table.blocks[top].exits.push(exit);
            table.blocks[top].patch = None;
            table.blocks[top].symbol = Symbol::Else;
        }

        Symbol::While => {
            let head = table.instructions.len();
            build_middle(table, node, errors);
            let patch = table.emit(Opcode::If, 0);
            table.blocks.push(OpenBlock {
                symbol: Symbol::While,
                line: node.line,
                head,
                patch: Some(patch),
                exits: Vec::new(),
            });
        }

        Symbol::End => {
            let block = match table.blocks.pop() {
                Some(block) => block,
                None => {
                    raise(errors, ErrorKind::BlockMismatch, node.line);
                    return;
                }
            };

            // Loops jump back to re-evaluate their condition.
            if block.symbol == Symbol::While {
                let back = table.emit(Opcode::Goto, 0);
                table.instructions[back].arg = block.head as i32 - back as i32;
            }

            let here = table.instructions.len();
            if let Some(patch) = block.patch {
                table.instructions[patch].arg = (here - patch) as i32;
            }
            for exit in block.exits {
                table.instructions[exit].arg = (here - exit) as i32;
            }
        }

        Symbol::Goto => {
            let index = table.emit(Opcode::Goto, 0);
            table.jumps.push(PendingJump {
                index,
                label: label_name(node),
                line: node.line,
            });
        }

        Symbol::Label => {
            table.labels.push(LabelDef {
                name: label_name(node),
                index: table.instructions.len(),
            });
        }

        Symbol::For => {
            // The loop grammar is recognized but code generation for it is
            // not implemented; the block is still opened so its `end` pairs
            // up cleanly.
            raise(errors, ErrorKind::UnknownOp, node.line);
            table.blocks.push(OpenBlock {
                symbol: Symbol::For,
                line: node.line,
                head: 0,
                patch: None,
                exits: Vec::new(),
            });
        }
    }
}

/// Index of the innermost open block if `elif`/`else` may continue it; loop
/// blocks cannot grow arms.
fn open_conditional(table: &SymbolTable) -> Option<usize> {
    let top = table.blocks.len().checked_sub(1)?;
    match table.blocks[top].symbol {
        Symbol::While | Symbol::For => None,
        _ => Some(top),
    }
}

fn label_name(node: &LexNode) -> String {
    debug_assert_matches!(
        node.middle.as_ref().map(|m| &m.kind),
        Some(NodeKind::Terminal(Terminal::Variable(_)))
    );
    match node.middle.as_ref().map(|m| &m.kind) {
        Some(NodeKind::Terminal(Terminal::Variable(name))) => name.clone(),
        _ => String::new(),
    }
}
