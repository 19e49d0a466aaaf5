use crate::error::{Chip8Error, Result};

/// Total size of the Chip8 memory.
pub const MEMORY_SIZE: usize = 4096;

/// The size of the interpreter.
///
/// This is really only used to determine where
/// the program memory should start.
pub const INTERPRETER_SIZE: usize = 0x200;

/// Maximum length of a ROM, the whole of program memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - INTERPRETER_SIZE;

/// Address of the first font glyph.
pub const FONT_ADDR: usize = 0;

/// Bytes per font glyph.
pub const FONT_GLYPH_SIZE: usize = 5;

/// Built in Chip8 font data. This will be stored in the
/// interpreter's memory.
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

/// The memory of the `Chip8`.
///
/// Every access is checked against [`MEMORY_SIZE`], out of range
/// accesses return [`Chip8Error::OutOfBounds`] instead of panicking.
#[derive(Clone)]
pub struct Memory {
    memory: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        let mut memory = Self {
            memory: [0; MEMORY_SIZE],
        };
        memory.reset();
        memory
    }
}

impl Memory {
    /// Create a new `Memory` object, zeroed apart from the font set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all of memory and write the font set back to [`FONT_ADDR`].
    pub fn reset(&mut self) {
        self.memory = [0; MEMORY_SIZE];
        self.memory[FONT_ADDR..FONT_ADDR + FONT.len()].copy_from_slice(&FONT);
    }

    /// Load the ROM bytes from `data` at the start of program memory.
    ///
    /// Program memory is cleared first, so nothing from a previously
    /// loaded ROM survives. The font and everything below
    /// [`INTERPRETER_SIZE`] is left untouched. Memory is not modified
    /// if the ROM is larger than [`MAX_ROM_SIZE`].
    pub fn load_rom(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: data.len(),
                max: MAX_ROM_SIZE,
            });
        }

        self.memory[INTERPRETER_SIZE..].fill(0);
        self.memory[INTERPRETER_SIZE..INTERPRETER_SIZE + data.len()].copy_from_slice(data);
        log::debug!(
            "Loaded {} byte ROM at {INTERPRETER_SIZE:#05X}..{:#05X}",
            data.len(),
            INTERPRETER_SIZE + data.len()
        );
        Ok(())
    }

    /// Load a ROM written as hex text, e.g. `"00 E0 a2 48"`.
    ///
    /// All whitespace is ignored and digits are case-insensitive.
    pub fn load_rom_hex(&mut self, text: &str) -> Result<()> {
        let data = decode_hex(text)?;
        self.load_rom(&data)
    }

    /// Read the byte at `addr`.
    pub fn read(&self, addr: usize) -> Result<u8> {
        self.memory
            .get(addr)
            .copied()
            .ok_or_else(|| out_of_bounds(addr))
    }

    /// Write `value` to `addr`.
    pub fn write(&mut self, addr: usize, value: u8) -> Result<()> {
        let byte = self
            .memory
            .get_mut(addr)
            .ok_or_else(|| out_of_bounds(addr))?;
        *byte = value;
        Ok(())
    }

    /// Borrow `len` bytes starting at `addr`.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        let end = checked_end(addr, len)?;
        Ok(&self.memory[addr..end])
    }

    /// Mutably borrow `len` bytes starting at `addr`.
    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        let end = checked_end(addr, len)?;
        Ok(&mut self.memory[addr..end])
    }

    /// Fetch the big-endian instruction word at `addr`.
    pub fn fetch(&self, addr: usize) -> Result<u16> {
        let bytes = self.slice(addr, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}

fn out_of_bounds(position: usize) -> Chip8Error {
    Chip8Error::OutOfBounds {
        what: "memory address",
        position,
        limit: MEMORY_SIZE,
    }
}

/// Returns the exclusive end of `addr..addr + len` if it fits in memory.
fn checked_end(addr: usize, len: usize) -> Result<usize> {
    match addr.checked_add(len) {
        Some(end) if end <= MEMORY_SIZE => Ok(end),
        // report the last address that would have been touched
        _ => Err(out_of_bounds(addr.saturating_add(len).saturating_sub(1))),
    }
}

/// Decode whitespace separated hex text into bytes.
fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let digits = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| Chip8Error::InvalidHexEncoding(format!("non-hex character {c:?}")))
        })
        .collect::<Result<Vec<u8>>>()?;

    if digits.len() % 2 != 0 {
        return Err(Chip8Error::InvalidHexEncoding(format!(
            "odd number of hex digits ({})",
            digits.len()
        )));
    }

    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}
