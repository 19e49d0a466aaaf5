use std::time::{Duration, Instant};

use anyhow::Context;
use chip8::{instruction::Instruction, Chip8};

use crate::config::Config;

/// The runner state.
///
/// Drives the [`Chip8`] a fixed number of steps per host tick and
/// reports what the program does with the sound timer.
pub struct App {
    pub chip8: Chip8,
    steps_per_tick: u32,
    tick_period: Duration,
    /// Whether the sound timer was above zero at the end of the last tick.
    sound_playing: bool,
}

impl App {
    /// Create a new `App` with the ROM and held keys from `config`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let path = config.rom.display();
        let mut chip8 = Chip8::new();

        if config.hex {
            let text = std::fs::read_to_string(&config.rom)
                .with_context(|| format!("Failed to read hex ROM from {path}"))?;
            chip8
                .load_rom_hex(&text)
                .with_context(|| format!("Failed to load hex ROM {path}"))?;
        } else {
            let data = std::fs::read(&config.rom)
                .with_context(|| format!("Failed to read ROM from {path}"))?;
            chip8
                .load_rom(&data)
                .with_context(|| format!("Failed to load ROM {path}"))?;
        }
        log::info!("Loaded {path}");

        for &key in &config.keys {
            chip8.set_key(key, true)?;
            log::debug!("Holding key {key:X}");
        }

        Ok(Self::with_chip8(chip8, config.steps_per_tick, config.tick_rate))
    }

    /// Wrap an already loaded `Chip8`.
    pub fn with_chip8(chip8: Chip8, steps_per_tick: u32, tick_rate: u32) -> Self {
        Self {
            chip8,
            steps_per_tick,
            tick_period: Duration::from_secs(1) / tick_rate.max(1),
            sound_playing: false,
        }
    }

    /// Run one host tick worth of steps.
    pub fn tick(&mut self) -> anyhow::Result<()> {
        for _ in 0..self.steps_per_tick {
            self.chip8.step().with_context(|| {
                format!("Instruction at {:#05X} failed", self.chip8.pc())
            })?;
        }

        let playing = self.chip8.sound_timer() > 0;
        if playing != self.sound_playing {
            log::info!("Sound {}", if playing { "on" } else { "off" });
            self.sound_playing = playing;
        }
        Ok(())
    }

    /// Returns why the program can not make any more progress, if it can't.
    pub fn stalled(&self) -> Option<&'static str> {
        let processor = &self.chip8.processor;
        if processor.halted() {
            return Some("the program counter ran off the end of memory");
        }
        if processor.pc != processor.last_opcode_addr {
            return None;
        }

        match Instruction::decode(processor.last_opcode) {
            Instruction::Jump(_) => Some("the program is jumping to itself"),
            Instruction::WaitKey(_) if self.chip8.bus.input.first_pressed().is_none() => {
                Some("the program is waiting for a key")
            }
            _ => None,
        }
    }

    /// Run `ticks` host ticks at the configured rate, or until the program
    /// stalls when `ticks` is `0`. Returns the number of ticks that ran.
    pub fn run(&mut self, ticks: u32) -> anyhow::Result<u32> {
        let mut ran = 0;
        while ticks == 0 || ran < ticks {
            let started = Instant::now();
            self.tick()?;
            ran += 1;

            if let Some(reason) = self.stalled() {
                log::info!("Stopping after {ran} ticks, {reason}");
                break;
            }
            if let Some(rest) = self.tick_period.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        Ok(ran)
    }
}
