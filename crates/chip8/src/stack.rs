use crate::error::{Chip8Error, Result};

/// The call stack of return addresses.
///
/// Unlike the COSMAC VIP interpreter there is no 16 frame limit, the stack
/// grows as needed. Returning with an empty stack is an error.
#[derive(Clone, Default, Debug)]
pub struct Stack {
    frames: Vec<u16>,
}

impl Stack {
    /// Create a new empty [`Stack`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a return address.
    pub fn push(&mut self, addr: u16) {
        self.frames.push(addr);
    }

    /// Pop the most recently pushed return address.
    pub fn pop(&mut self) -> Result<u16> {
        self.frames.pop().ok_or(Chip8Error::StackUnderflow)
    }

    /// The most recently pushed return address, if any.
    pub fn peek(&self) -> Option<u16> {
        self.frames.last().copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
