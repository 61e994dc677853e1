//! Serialized machine images for the [tbvm](../tbvm/index.html) virtual
//! machine.
//!
//! A `.tbx` stream is a three-word header — data-cell count, data pointer,
//! heap pointer — followed by the raw bytes of the CODE and DATA segments
//! (exactly `heap_pointer` of them). Loading reconstructs the same image in a
//! fresh memory region of caller-chosen size.

use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use byteorder::{ReadBytesExt, WriteBytesExt};

use tbvm::{Endian, Layout, Machine, ProgramError};


/// A linked, position-independent program: segment layout plus the image
/// bytes of the CODE and DATA segments.
#[derive(Debug, PartialEq)]
pub struct Program {
    layout: Layout,
    image: Vec<u8>,
}

impl Program {
    pub fn from(layout: Layout, image: Vec<u8>) -> Program {
        Program { layout, image }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn image(&self) -> &[u8] {
        &self.image[..]
    }

    /// Boots the program in a machine with `memory_size` bytes of memory
    /// (must be at least `heap_pointer` of them).
    pub fn into_machine(
        self,
        memory_size: u32,
        out: Box<dyn Write>,
        screen_width: usize,
        screen_height: usize,
    ) -> Result<Machine, ProgramError> {
        Machine::new(
            self.layout,
            &self.image,
            memory_size,
            out,
            screen_width,
            screen_height,
        )
    }
}

pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Program> {
    let data_var_count = reader.read_u32::<Endian>()?;
    let data_pointer = reader.read_u32::<Endian>()?;
    let heap_pointer = reader.read_u32::<Endian>()?;

    let mut image = vec![0; heap_pointer as usize];
    reader.read_exact(&mut image)?;

    Ok(Program::from(
        Layout {
            data_var_count,
            data_pointer,
            heap_pointer,
        },
        image,
    ))
}

pub fn write<W: Write>(writer: &mut W, program: &Program) -> std::io::Result<()> {
    writer.write_u32::<Endian>(program.layout.data_var_count)?;
    writer.write_u32::<Endian>(program.layout.data_pointer)?;
    writer.write_u32::<Endian>(program.layout.heap_pointer)?;
    writer.write_all(&program.image[..])?;
    Ok(())
}

pub trait ReadTbxExt: Read + Sized {
    fn read_tbx(&mut self) -> std::io::Result<Program> {
        read(self)
    }
}

impl<R: Read + Sized> ReadTbxExt for R {}

pub trait WriteTbxExt: Write + Sized {
    fn write_tbx(&mut self, program: &Program) -> std::io::Result<()> {
        write(self, program)
    }
}

impl<W: Write + Sized> WriteTbxExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Program> {
    BufReader::new(File::open(path)?).read_tbx()
}

pub fn write_file<P: AsRef<Path>>(path: P, program: &Program) -> std::io::Result<()> {
    BufWriter::new(File::create(path)?).write_tbx(program)
}
