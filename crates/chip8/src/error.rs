/// Errors that can be returned by the `Chip8` and its components.
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    /// The ROM does not fit into program memory (`0x200..=0xFFF`).
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    /// Hex ROM text had an odd number of digits or a non-hex character.
    #[error("invalid hex ROM encoding: {0}")]
    InvalidHexEncoding(String),

    /// A return instruction was executed with an empty call stack.
    #[error("stack underflow: return with empty call stack")]
    StackUnderflow,

    /// Key indices are limited to `0x0..=0xF`.
    #[error("invalid key index {0:#X}, expected 0x0..=0xF")]
    InvalidKeyIndex(usize),

    /// A memory address or framebuffer coordinate outside of the addressable space.
    #[error("{what} out of bounds: {position:#X} (limit {limit:#X})")]
    OutOfBounds {
        what: &'static str,
        position: usize,
        limit: usize,
    },

    /// The operating system random source failed while executing `Cxnn`.
    #[error("failed to get random byte: {0}")]
    Entropy(#[from] getrandom::Error),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
