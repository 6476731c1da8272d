//! The 4 KiB address space, holding the font, the program and scratch data.

use crate::emulator::error::Error;

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_START: u16 = 0x50;
/// Each glyph is 5 bytes tall.
pub const FONT_GLYPH_SIZE: u16 = 5;
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Flat, bounds-checked byte storage.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Create zeroed memory with the font loaded.
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        let font_start = FONT_START as usize;
        bytes[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// Copy a program verbatim to `PROGRAM_START`.
    /// Nothing is written if it does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Error> {
        let start = PROGRAM_START as usize;
        let max = MEM_SIZE - start;
        if program.len() > max {
            return Err(Error::ProgramTooLarge { len: program.len(), max });
        }
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8, Error> {
        self.bytes.get(address).copied().ok_or(Error::OutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), Error> {
        let byte = self.bytes.get_mut(address).ok_or(Error::OutOfBounds { address })?;
        *byte = value;
        Ok(())
    }

    /// Borrow `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], Error> {
        let end = Self::checked_end(address, len)?;
        Ok(&self.bytes[address..end])
    }

    /// Mutably borrow `len` bytes starting at `address`.
    /// Callers get either the whole range or an error, never a partial one.
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], Error> {
        let end = Self::checked_end(address, len)?;
        Ok(&mut self.bytes[address..end])
    }

    fn checked_end(address: usize, len: usize) -> Result<usize, Error> {
        let end = address.saturating_add(len);
        if end > MEM_SIZE {
            // Report the first address that does not exist.
            Err(Error::OutOfBounds { address: address.max(MEM_SIZE) })
        } else {
            Ok(end)
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
