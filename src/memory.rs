use byteorder::ByteOrder;

use crate::Endian;

/// A linear byte region with bounds-checked access.
pub trait Storage {
    /// Total length of the region in bytes.
    fn length(&self) -> u32;

    /// Whether the range `[address..address+length]` is addressable.
    fn check_range(&self, address: u32, length: u32) -> bool;

    /// Immutably borrows the slice at `[address..address+length]`.
    ///
    /// # Errors
    /// Fails if the range is not addressable.
    fn borrow_slice(&self, address: u32, length: u32) -> Result<&[u8], ()>;

    /// Mutably borrows the slice at `[address..address+length]`.
    fn borrow_slice_mut(&mut self, address: u32, length: u32) -> Result<&mut [u8], ()>;

    /// Reads four bytes at `address` as a `u32` in image byte order.
    fn read_word(&self, address: u32) -> Result<u32, ()> {
        Ok(Endian::read_u32(self.borrow_slice(address, 4)?))
    }

    /// Writes `value` at `address` in image byte order.
    fn write_word(&mut self, address: u32, value: u32) -> Result<(), ()> {
        Endian::write_u32(self.borrow_slice_mut(address, 4)?, value);
        Ok(())
    }
}

/// Vec-backed [`Storage`] holding a whole machine image.
///
/// # Examples
/// ```
/// use tbvm::{Memory, Storage};
///
/// let memory = Memory::new(16);
/// assert_eq!(memory.length(), 16);
/// assert!(memory.check_range(4, 12));
/// assert!(!memory.check_range(10, 20));
/// ```
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// A zero-filled region of `length` bytes.
    pub fn new(length: u32) -> Memory {
        Memory {
            data: vec![0; length as usize],
        }
    }

    /// The whole region as an immutable slice.
    pub fn data(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Storage for Memory {
    fn length(&self) -> u32 {
        self.data.len() as u32
    }

    fn check_range(&self, address: u32, length: u32) -> bool {
        u64::from(address) + u64::from(length) <= self.data.len() as u64
    }

    fn borrow_slice(&self, address: u32, length: u32) -> Result<&[u8], ()> {
        if self.check_range(address, length) {
            Ok(&self.data[address as usize..(address + length) as usize])
        } else {
            Err(())
        }
    }

    fn borrow_slice_mut(&mut self, address: u32, length: u32) -> Result<&mut [u8], ()> {
        if self.check_range(address, length) {
            Ok(&mut self.data[address as usize..(address + length) as usize])
        } else {
            Err(())
        }
    }
}

impl<'a> From<&'a [u8]> for Memory {
    fn from(s: &'a [u8]) -> Memory {
        Memory { data: Vec::from(s) }
    }
}
