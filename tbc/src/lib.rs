//! Compiler for a small BASIC dialect targeting the
//! [tbvm](../tbvm/index.html) virtual machine.
//!
//! The main entry points are [`compile`](fn.compile.html), which turns source
//! text into a linked [`Program`](../tbx/struct.Program.html), and
//! [`load_source`](fn.load_source.html), which additionally boots the program
//! in a ready-to-step [`Machine`](../tbvm/struct.Machine.html). All parse and
//! compile problems are accumulated into one error list so a single compile
//! reports every bad line, each rendered as `line N: message`.
//!
//! # The Language
//!
//! Programs are ASCII text, one statement per line, with `//` line comments:
//!
//! ```text
//! // greatest power of two below a limit
//! limit = 1000
//! x = 1
//! while (x * 2 <= limit)
//!     x = x * 2
//! end
//! disp(x)
//! ```
//!
//! Statements are declarations (`x = expr`), the block constructs
//! `if (b)` / `elif (b)` / `else` / `while (b)` closed by `end`, jumps
//! (`goto Name`, `label Name :`), or a bare expression evaluated for its
//! effect. Expressions use the usual precedence: `or` < `and` < comparisons
//! < `+ -` < `* / %` < unary `! -`, with parentheses for grouping. Literals
//! are integers, floats (`1.5`), booleans (`true`/`false`) and quoted
//! strings (no escapes; the two-character sequence `\n` prints as a
//! newline).
//!
//! Built-in functions: `input()`, `disp(value)`, `output(x, y, color)`,
//! `getKey()`, `clear()`, `pause()` and `halt()`. The three input-style
//! builtins suspend the machine with an interrupt; the host supplies the
//! user's line via `Machine::release_interrupt`.
//!
//! `for` is recognized by the grammar but rejected by the code generator,
//! and arithmetic and comparisons are integer-only at run time.

mod ast;
mod codegen;
mod highlight;
mod link;
mod parser;
mod symbols;
mod token;


use std::io::Write;

use tbvm::{Machine, ProgramError};
use tbx::Program;

pub use crate::highlight::{highlight, HighlightToken, TokenKind};
pub use crate::token::{next_token, Span, Tokens};

/// Parses, compiles and links `source`.
///
/// Returns the linked program, or every error the pipeline collected; any
/// error at all means no program is produced.
pub fn compile(source: &str) -> Result<Program, Vec<ProgramError>> {
    let mut errors = Vec::new();

    let mut table = parser::parse_program(source, &mut errors);
    codegen::emit_program(&mut table, &mut errors);
    let program = link::link(table, &mut errors);

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

/// Compiles `source` and boots it in a machine with `memory_size` bytes of
/// memory, writing program output to `out`.
pub fn load_source(
    source: &str,
    memory_size: u32,
    out: Box<dyn Write>,
    screen_width: usize,
    screen_height: usize,
) -> Result<Machine, Vec<ProgramError>> {
    let program = compile(source)?;
    program
        .into_machine(memory_size, out, screen_width, screen_height)
        .map_err(|error| vec![error])
}
