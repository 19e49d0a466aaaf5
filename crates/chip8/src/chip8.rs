use std::{
    sync::{atomic::AtomicU8, Arc},
    time::Instant,
};

mod clock;
mod error;
pub mod graphics;
mod input;
pub mod instruction;
pub mod memory;
mod processor;
mod stack;

pub use error::{Chip8Error, Result};
pub use input::{KeyHandle, KEY_COUNT};
pub use processor::{Processor, STARTING_PC};
pub use stack::Stack;

/// Contains all the different components of the `Chip8` system, excluding the `Processor`.
#[derive(Default)]
pub struct Bus {
    pub clock: clock::Clock,
    pub graphics: graphics::GraphicsBuffer,
    pub input: input::Input,
    pub memory: memory::Memory,
}

/// The main CHIP-8 interpreter state, contains all the components of the
/// CHIP-8 and procedures to interact with them at a high level.
///
/// The `Chip8` owns all of its state. Hosts that drive it from several
/// threads should put the whole instance behind a single lock, only key
/// input ([`Chip8::key_handle`]) and the sound timer
/// ([`Chip8::sound_timer_handle`]) can be shared without one.
pub struct Chip8 {
    pub processor: Processor,
    pub bus: Bus,
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8 {
    /// Create a new Chip8 instance.
    pub fn new() -> Self {
        Self {
            processor: Processor::new(),
            bus: Bus::default(),
        }
    }

    /// Performs one execution step in the interpreter, cycling
    /// the processor and updating the timers.
    pub fn step(&mut self) -> Result<()> {
        self.step_at(Instant::now())
    }

    /// Same as [`Chip8::step`], but with the timers updated as if the
    /// current time was `now`.
    ///
    /// A halted processor does nothing, not even update the timers.
    pub fn step_at(&mut self, now: Instant) -> Result<()> {
        if self.processor.halted() {
            return Ok(());
        }
        self.processor.cycle(&mut self.bus)?;
        self.bus.clock.update_at(now);
        Ok(())
    }

    /// Load the given ROM data into program memory.
    ///
    /// Registers, timers and the screen are left as they are, use
    /// [`Chip8::reset_and_load`] to start a program from scratch.
    pub fn load_rom(&mut self, data: &[u8]) -> Result<()> {
        self.bus.memory.load_rom(data)
    }

    /// Load a ROM written as whitespace separated hex text.
    pub fn load_rom_hex(&mut self, text: &str) -> Result<()> {
        self.bus.memory.load_rom_hex(text)
    }

    /// Update the input state for the given key code.
    pub fn set_key(&mut self, key_code: usize, pressed: bool) -> Result<()> {
        self.bus.input.update(key_code, pressed)
    }

    /// Returns whether the given key is currently pressed.
    pub fn is_key_pressed(&self, key_code: usize) -> Result<bool> {
        self.bus.input.is_key_pressed(key_code)
    }

    /// A handle for updating the keys from another thread.
    pub fn key_handle(&self) -> KeyHandle {
        self.bus.input.handle()
    }

    /// Returns whether the pixel at `(x, y)` is lit.
    pub fn pixel_at(&self, x: usize, y: usize) -> Result<bool> {
        self.bus.graphics.pixel_at(x, y)
    }

    pub fn graphics(&self) -> &graphics::GraphicsBuffer {
        &self.bus.graphics
    }

    pub fn delay_timer(&self) -> u8 {
        self.bus.clock.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.bus.clock.sound_timer()
    }

    /// A shared handle to the sound timer. Audio should play while it is above `0`.
    pub fn sound_timer_handle(&self) -> Arc<AtomicU8> {
        self.bus.clock.sound_timer_handle()
    }

    pub fn pc(&self) -> u16 {
        self.processor.pc
    }

    pub fn index(&self) -> u16 {
        self.processor.i
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.processor.v
    }

    /// Returns the value of register `Vx`.
    pub fn register(&self, x: usize) -> Result<u8> {
        self.processor.v.get(x).copied().ok_or(Chip8Error::OutOfBounds {
            what: "register",
            position: x,
            limit: self.processor.v.len(),
        })
    }

    /// Returns whether the program counter ran off the end of memory.
    pub fn halted(&self) -> bool {
        self.processor.halted()
    }

    /// Reset the state of the `Chip8` instance.
    ///
    /// Memory is cleared and the font reloaded, the screen, keys, timers,
    /// registers and stack are zeroed and the program counter is moved back
    /// to [`STARTING_PC`]. Key and sound timer handles stay connected.
    pub fn reset(&mut self) {
        self.processor = Processor::new();
        self.bus.memory.reset();
        self.bus.graphics.clear();
        self.bus.input.release_all();
        self.bus.clock.reset_at(Instant::now());
        log::debug!("Chip8 reset");
    }

    /// Convenience method for resetting the `Chip8` and loading the given ROM.
    pub fn reset_and_load(&mut self, data: &[u8]) -> Result<()> {
        self.reset();
        self.load_rom(data)
    }
}
