use std::io::Write;

use log::{debug, trace};
use num_traits::FromPrimitive;

use crate::constants::{INSTR_BYTES, OP_BYTES, VAR_BYTES};
use crate::variable::{is_boolean, is_float, is_integer};
use crate::{
    ErrorKind, Instruction, Interrupt, Memory, Opcode, ProgramError, Storage, Variable,
};

/// Segment layout of a linked image.
///
/// `data_pointer` is the byte offset where the static-data segment begins
/// (equal to the code-segment length), `heap_pointer` the first free byte
/// past it, and `data_var_count` the number of variable cells the segment
/// starts with (string bytes follow the cells).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    pub data_var_count: u32,
    pub data_pointer: u32,
    pub heap_pointer: u32,
}

/// Gray-scale pixel grid written by the `output` and `clear` opcodes.
struct Screen {
    width: usize,
    height: usize,
    buffer: Vec<u8>,
}

impl Screen {
    fn new(width: usize, height: usize) -> Screen {
        Screen {
            width,
            height,
            buffer: vec![0; width * height],
        }
    }

    fn clear(&mut self) {
        for b in self.buffer.iter_mut() {
            *b = 0;
        }
    }
}

/// The virtual machine: one linear memory image holding the code segment,
/// the static-data segment and a downward-growing stack, plus the pointers
/// that drive execution.
///
/// ```text
/// low addr   CODE:   instruction cells  [0 .. data_pointer)
///            DATA:   variable cells + string bytes
///                                       [data_pointer .. heap_pointer)
///            STACK:  grows downward from the end of memory
/// high addr
/// ```
///
/// The machine executes one instruction per [`step`](#method.step) call and
/// suspends on the `input`/`getKey`/`pause` opcodes until the host calls
/// [`release_interrupt`](#method.release_interrupt). The output stream is
/// borrowed from the host for the machine's lifetime.
pub struct Machine {
    memory: Memory,
    screen: Screen,
    out: Box<dyn Write>,

    instruction_pointer: u32,
    data_pointer: u32,
    heap_pointer: u32,
    data_var_count: u32,
    stack_pointer: u32,
    stack_base_pointer: u32,

    ticks: usize,
    line_index: usize,
    halted: bool,
    interrupt: Interrupt,
}

impl Machine {
    /// Boots a linked image inside a fresh memory region of `memory_size`
    /// bytes. Fails with `Overflow` when the image does not fit or does not
    /// match its layout.
    pub fn new(
        layout: Layout,
        image: &[u8],
        memory_size: u32,
        out: Box<dyn Write>,
        screen_width: usize,
        screen_height: usize,
    ) -> Result<Machine, ProgramError> {
        if image.len() as u32 != layout.heap_pointer || layout.heap_pointer > memory_size {
            return Err(ProgramError::new(ErrorKind::Overflow, 0));
        }

        let mut memory = Memory::new(memory_size);
        memory
            .borrow_slice_mut(0, layout.heap_pointer)
            .map_err(|_| ProgramError::new(ErrorKind::Overflow, 0))?
            .copy_from_slice(image);

        debug!(
            "booting image: {} code bytes, {} data cells, {} bytes of memory",
            layout.data_pointer, layout.data_var_count, memory_size
        );

        Ok(Machine {
            memory,
            screen: Screen::new(screen_width, screen_height),
            out,
            instruction_pointer: 0,
            data_pointer: layout.data_pointer,
            heap_pointer: layout.heap_pointer,
            data_var_count: layout.data_var_count,
            stack_pointer: memory_size,
            stack_base_pointer: memory_size,
            ticks: 0,
            line_index: 1,
            halted: false,
            interrupt: Interrupt::None,
        })
    }

    /// Executes one instruction.
    ///
    /// Returns the interrupt state after the instruction; once it is not
    /// `None`, further calls return immediately until the host calls
    /// [`release_interrupt`](#method.release_interrupt). A machine that ran
    /// its synthesized `halt` reports `Halted` on the next call, which is the
    /// normal-completion sentinel rather than a fault.
    pub fn step(&mut self) -> Result<Interrupt, ProgramError> {
        if self.halted {
            return Err(self.fault(ErrorKind::Halted));
        }
        if self.interrupt != Interrupt::None {
            return Ok(self.interrupt);
        }
        if u64::from(self.instruction_pointer) + u64::from(INSTR_BYTES)
            > u64::from(self.memory.length())
        {
            return Err(self.fault(ErrorKind::Overflow));
        }

        let result = match self.fetch() {
            Some(instruction) => self.dispatch(instruction),
            None => Err(ErrorKind::UnknownOp),
        };

        // A faulting instruction still costs its cycle; only the guards
        // above return before the tick is charged.
        self.ticks += 1;
        self.instruction_pointer = self.instruction_pointer.wrapping_add(INSTR_BYTES);

        match result {
            Ok(()) => Ok(self.interrupt),
            Err(kind) => Err(self.fault(kind)),
        }
    }

    /// Clears the pending interrupt and feeds it the host-supplied input.
    ///
    /// `pause` discards the input. `getKey` pushes the first byte as an Int
    /// (0 when empty). `input` pushes an Int, Float or Bool depending on the
    /// literal form of the text, or Int(-1) when it parses as none of them.
    pub fn release_interrupt(&mut self, input: &str) {
        let released = self.interrupt;
        self.interrupt = Interrupt::None;

        match released {
            Interrupt::None | Interrupt::Pause => {}
            Interrupt::GetKey => {
                let key = input.bytes().next().unwrap_or(0);
                self.push(Variable::Int(i32::from(key))).ok();
            }
            Interrupt::Input => {
                self.push(parse_input(input)).ok();
            }
        }
    }

    pub fn instruction_count(&self) -> usize {
        (self.data_pointer / INSTR_BYTES) as usize
    }

    pub fn variable_count(&self) -> usize {
        self.data_var_count as usize
    }

    pub fn current_line(&self) -> usize {
        self.line_index
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn interrupt(&self) -> Interrupt {
        self.interrupt
    }

    /// Read-only view of the screen buffer, one byte per pixel, row-major
    /// with the origin in the bottom-left.
    pub fn screen(&self) -> &[u8] {
        &self.screen.buffer
    }

    pub fn screen_width(&self) -> usize {
        self.screen.width
    }

    pub fn screen_height(&self) -> usize {
        self.screen.height
    }

    pub fn stack_pointer(&self) -> u32 {
        self.stack_pointer
    }

    pub fn stack_base_pointer(&self) -> u32 {
        self.stack_base_pointer
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    fn fault(&self, kind: ErrorKind) -> ProgramError {
        ProgramError::new(kind, self.line_index)
    }

    fn fetch(&self) -> Option<Instruction> {
        let op = self.memory.read_word(self.instruction_pointer).ok()?;
        let arg = self
            .memory
            .read_word(self.instruction_pointer + OP_BYTES)
            .ok()? as i32;
        Some(Instruction {
            op: Opcode::from_u32(op)?,
            arg,
        })
    }

    fn dispatch(&mut self, instruction: Instruction) -> Result<(), ErrorKind> {
        let arg = instruction.arg;
        match instruction.op {
            Opcode::Nop => {
                self.line_index = arg.max(0) as usize;
                Ok(())
            }

            Opcode::LoadData => {
                let cell = self.read_cell(offset_addr(self.data_pointer, arg)?)?;
                self.push(cell)
            }
            Opcode::LoadVar => self.push(Variable::Offset(arg)),
            Opcode::AddStack => self.add_stack(arg),
            Opcode::Set => self.store(),

            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod => {
                self.math_op(instruction.op)
            }

            Opcode::Eq
            | Opcode::NotEq
            | Opcode::Greater
            | Opcode::GreaterEq
            | Opcode::Less
            | Opcode::LessEq => self.comp_op(instruction.op),

            Opcode::Not => self.not_op(),
            Opcode::And | Opcode::Or => self.logic_op(),

            Opcode::If => self.cond_jump(arg),
            Opcode::Goto => {
                self.relative_jump(arg);
                Ok(())
            }
            Opcode::Halt => {
                self.halted = true;
                trace!("halted after {} ticks", self.ticks + 1);
                Ok(())
            }

            Opcode::Pause => {
                self.interrupt = Interrupt::Pause;
                Ok(())
            }
            Opcode::Input => {
                self.interrupt = Interrupt::Input;
                Ok(())
            }
            Opcode::GetKey => {
                self.interrupt = Interrupt::GetKey;
                Ok(())
            }

            Opcode::Disp => self.disp(),
            Opcode::Output => self.output(),
            Opcode::Clear => {
                self.screen.clear();
                Ok(())
            }

            // Reserved for subroutine support.
            Opcode::Exec | Opcode::Return => Ok(()),

            _ => Err(ErrorKind::UnknownOp),
        }
    }

    fn read_cell(&self, address: u32) -> Result<Variable, ErrorKind> {
        let buf = self
            .memory
            .borrow_slice(address, VAR_BYTES)
            .map_err(|_| ErrorKind::Overflow)?;
        Variable::decode(buf)
    }

    fn write_cell(&mut self, address: u32, cell: Variable) -> Result<(), ErrorKind> {
        let buf = self
            .memory
            .borrow_slice_mut(address, VAR_BYTES)
            .map_err(|_| ErrorKind::Overflow)?;
        cell.encode(buf);
        Ok(())
    }

    fn push(&mut self, cell: Variable) -> Result<(), ErrorKind> {
        let new_sp = self
            .stack_pointer
            .checked_sub(VAR_BYTES)
            .ok_or(ErrorKind::Overflow)?;
        if new_sp < self.heap_pointer {
            return Err(ErrorKind::Overflow);
        }
        self.write_cell(new_sp, cell)?;
        self.stack_pointer = new_sp;
        Ok(())
    }

    fn pop(&mut self) -> Result<Variable, ErrorKind> {
        let cell = self.read_cell(self.stack_pointer)?;
        self.stack_pointer += VAR_BYTES;
        Ok(cell)
    }

    /// Collapses an `Offset` cell to the value of the frame slot it names.
    /// Every arithmetic, comparison, assignment and I/O path funnels through
    /// here.
    fn deref(&self, cell: Variable) -> Result<Variable, ErrorKind> {
        match cell {
            Variable::Offset(off) => {
                self.read_cell(offset_addr(self.stack_base_pointer, off)?)
            }
            other => Ok(other),
        }
    }

    fn add_stack(&mut self, delta: i32) -> Result<(), ErrorKind> {
        let new_sp = i64::from(self.stack_pointer) + i64::from(delta);
        if delta > 0 && new_sp >= i64::from(self.memory.length()) {
            return Err(ErrorKind::Overflow);
        }
        if delta < 0 && new_sp < i64::from(self.heap_pointer) {
            return Err(ErrorKind::Overflow);
        }
        self.stack_pointer = new_sp as u32;

        // Freshly reserved slots start zeroed.
        if delta < 0 {
            let region = self
                .memory
                .borrow_slice_mut(self.stack_pointer, (-delta) as u32)
                .map_err(|_| ErrorKind::Overflow)?;
            for b in region.iter_mut() {
                *b = 0;
            }
        }
        Ok(())
    }

    fn store(&mut self) -> Result<(), ErrorKind> {
        let a = self.pop()?;
        let b = self.pop()?;

        let value = self.deref(a)?;
        match b {
            Variable::Offset(off) => {
                self.write_cell(offset_addr(self.stack_base_pointer, off)?, value)
            }
            _ => Err(ErrorKind::ConstSet),
        }
    }

    fn math_op(&mut self, op: Opcode) -> Result<(), ErrorKind> {
        let a = self.pop()?;
        let out_addr = self.stack_pointer;
        let b = self.read_cell(out_addr)?;

        // Integer arithmetic only; the result overwrites B in place.
        let (b, a) = match (self.deref(b)?, self.deref(a)?) {
            (Variable::Int(b), Variable::Int(a)) => (b, a),
            _ => return Err(ErrorKind::TypeMismatch),
        };

        let result = match op {
            Opcode::Add => b.wrapping_add(a),
            Opcode::Sub => b.wrapping_sub(a),
            Opcode::Mul => b.wrapping_mul(a),
            Opcode::Div => {
                if a == 0 {
                    return Err(ErrorKind::DivZero);
                }
                b.wrapping_div(a)
            }
            Opcode::Mod => {
                if a == 0 {
                    return Err(ErrorKind::DivZero);
                }
                b.wrapping_rem(a)
            }
            _ => return Err(ErrorKind::UnknownOp),
        };

        self.write_cell(out_addr, Variable::Int(result))
    }

    fn comp_op(&mut self, op: Opcode) -> Result<(), ErrorKind> {
        let a = self.pop()?;
        let out_addr = self.stack_pointer;
        let b = self.read_cell(out_addr)?;

        let (b, a) = match (self.deref(b)?, self.deref(a)?) {
            (Variable::Int(b), Variable::Int(a)) => (b, a),
            _ => return Err(ErrorKind::TypeMismatch),
        };

        let result = match op {
            Opcode::Eq => b == a,
            Opcode::NotEq => b != a,
            Opcode::Greater => b > a,
            Opcode::GreaterEq => b >= a,
            Opcode::Less => b < a,
            Opcode::LessEq => b <= a,
            _ => return Err(ErrorKind::UnknownOp),
        };

        self.write_cell(out_addr, Variable::Int(result as i32))
    }

    fn not_op(&mut self) -> Result<(), ErrorKind> {
        let addr = self.stack_pointer;
        let value = truthy_int(self.deref(self.read_cell(addr)?)?)?;
        self.write_cell(addr, Variable::Int((value == 0) as i32))
    }

    fn logic_op(&mut self) -> Result<(), ErrorKind> {
        let a = self.pop()?;
        let out_addr = self.stack_pointer;
        let b = self.read_cell(out_addr)?;

        let a = truthy_int(self.deref(a)?)?;
        let b = truthy_int(self.deref(b)?)?;

        // TODO: Or still evaluates through the And path here; splitting the
        // dispatch needs an audit of programs that lean on the current result.
        let result = (a != 0 && b != 0) as i32;
        self.write_cell(out_addr, Variable::Int(result))
    }

    fn cond_jump(&mut self, arg: i32) -> Result<(), ErrorKind> {
        let condition = self.pop()?;
        let falsy = match self.deref(condition)? {
            Variable::Int(v) => v == 0,
            Variable::Float(v) => v == 0.0,
            Variable::Bool(v) => !v,
            _ => return Err(ErrorKind::TypeMismatch),
        };
        if falsy {
            self.relative_jump(arg);
        }
        Ok(())
    }

    /// Moves the instruction pointer `cells` instruction cells away from the
    /// current instruction, compensating for the advance the step loop
    /// re-adds.
    fn relative_jump(&mut self, cells: i32) {
        let delta = (i64::from(cells) - 1) * i64::from(INSTR_BYTES);
        self.instruction_pointer = (i64::from(self.instruction_pointer) + delta) as u32;
    }

    fn disp(&mut self) -> Result<(), ErrorKind> {
        let cell = self.pop()?;
        match self.deref(cell)? {
            Variable::Int(v) => {
                write!(self.out, "{}", v).ok();
            }
            Variable::Str(off) => {
                let raw = self.read_string(off)?;
                let mut rendered = Vec::with_capacity(raw.len());
                let mut i = 0;
                while i < raw.len() {
                    // The two-character sequence \n becomes a newline at
                    // display time only.
                    if raw[i] == b'\\' && raw.get(i + 1) == Some(&b'n') {
                        rendered.push(b'\n');
                        i += 2;
                    } else {
                        rendered.push(raw[i]);
                        i += 1;
                    }
                }
                self.out.write_all(&rendered).ok();
            }
            _ => return Err(ErrorKind::TypeMismatch),
        }
        self.out.flush().ok();
        Ok(())
    }

    fn read_string(&self, off: i32) -> Result<Vec<u8>, ErrorKind> {
        let start = offset_addr(self.data_pointer, off)?;
        if start > self.heap_pointer {
            return Err(ErrorKind::Overflow);
        }
        let raw = self
            .memory
            .borrow_slice(start, self.heap_pointer - start)
            .map_err(|_| ErrorKind::Overflow)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(raw[..end].to_vec())
    }

    fn output(&mut self) -> Result<(), ErrorKind> {
        let color = self.pop()?;
        let y = self.pop()?;
        let x = self.pop()?;

        let color = self.deref(color)?;
        let y = self.deref(y)?;
        let x = self.deref(x)?;

        let (x, y, color) = match (x, y, color) {
            (Variable::Int(x), Variable::Int(y), Variable::Int(color)) => (x, y, color),
            _ => return Err(ErrorKind::TypeMismatch),
        };

        if x < 0 || x as usize >= self.screen.width || y < 0 || y as usize >= self.screen.height
        {
            return Err(ErrorKind::Overflow);
        }
        self.screen.buffer[y as usize * self.screen.width + x as usize] = color as u8;
        Ok(())
    }
}

fn truthy_int(cell: Variable) -> Result<i32, ErrorKind> {
    match cell {
        Variable::Int(v) => Ok(v),
        Variable::Bool(v) => Ok(v as i32),
        _ => Err(ErrorKind::TypeMismatch),
    }
}

fn offset_addr(base: u32, offset: i32) -> Result<u32, ErrorKind> {
    let address = i64::from(base) + i64::from(offset);
    if address < 0 || address > i64::from(u32::max_value()) {
        Err(ErrorKind::Overflow)
    } else {
        Ok(address as u32)
    }
}

fn parse_input(input: &str) -> Variable {
    if is_integer(input) {
        match input.parse::<i32>() {
            Ok(v) => Variable::Int(v),
            Err(_) => Variable::Int(-1),
        }
    } else if is_float(input) {
        match input.parse::<f32>() {
            Ok(v) => Variable::Float(v),
            Err(_) => Variable::Int(-1),
        }
    } else if is_boolean(input) {
        Variable::Bool(input == "true")
    } else {
        Variable::Int(-1)
    }
}
