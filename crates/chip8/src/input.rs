use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::error::{Chip8Error, Result};

/// Number of keys on the Chip8 keypad.
pub const KEY_COUNT: usize = 16;

fn check_key(key_code: usize) -> Result<usize> {
    if key_code < KEY_COUNT {
        Ok(key_code)
    } else {
        Err(Chip8Error::InvalidKeyIndex(key_code))
    }
}

/// A cloneable handle to the key state of a `Chip8`.
///
/// Input can be written from any thread, every key is a single atomic,
/// so the processor never sees a half written state.
#[derive(Clone, Default)]
pub struct KeyHandle {
    state: Arc<[AtomicBool; KEY_COUNT]>,
}

impl KeyHandle {
    /// Update the pressed state of the given key code.
    pub fn set_key(&self, key_code: usize, pressed: bool) -> Result<()> {
        self.state[check_key(key_code)?].store(pressed, Ordering::SeqCst);
        Ok(())
    }

    /// Returns whether the given key is currently pressed.
    pub fn is_key_pressed(&self, key_code: usize) -> Result<bool> {
        Ok(self.state[check_key(key_code)?].load(Ordering::SeqCst))
    }
}

/// Input system for the `Chip8`. This keeps track of the pressed state of all 16 keys.
#[derive(Default)]
pub struct Input {
    keys: KeyHandle,
}

impl Input {
    /// Create a new [`Input`] instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the input state of the given key code.
    pub fn update(&self, key_code: usize, pressed: bool) -> Result<()> {
        self.keys.set_key(key_code, pressed)
    }

    /// Returns whether the given key is currently pressed.
    pub fn is_key_pressed(&self, key_code: usize) -> Result<bool> {
        self.keys.is_key_pressed(key_code)
    }

    /// Returns whether the key in the low nibble of `key` is pressed.
    pub fn is_nibble_pressed(&self, key: u8) -> bool {
        self.keys.state[usize::from(key & 0xF)].load(Ordering::SeqCst)
    }

    /// The lowest key code that is currently pressed.
    pub fn first_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT as u8).find(|&key| self.keys.state[usize::from(key)].load(Ordering::SeqCst))
    }

    /// Release every key. Handles given out earlier stay connected.
    pub fn release_all(&self) {
        for key in self.keys.state.iter() {
            key.store(false, Ordering::SeqCst);
        }
    }

    /// Get a handle that can update the keys from another thread.
    pub fn handle(&self) -> KeyHandle {
        self.keys.clone()
    }
}
