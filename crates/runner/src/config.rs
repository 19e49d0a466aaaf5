use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_STEPS_PER_TICK: u32 = 10;

/// Run a CHIP-8 ROM without a window and print the final screen.
#[derive(Debug, Parser)]
#[command(name = "chip8", version)]
pub struct Config {
    /// Path of the ROM to run.
    pub rom: PathBuf,

    /// Read the ROM as whitespace separated hex text instead of raw bytes.
    #[arg(long)]
    pub hex: bool,

    /// Instructions executed on every host tick.
    #[arg(long, default_value_t = DEFAULT_STEPS_PER_TICK)]
    pub steps_per_tick: u32,

    /// Host ticks per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub tick_rate: u32,

    /// Ticks to run before printing the screen, 0 runs until the program stalls.
    #[arg(long, default_value_t = 120)]
    pub ticks: u32,

    /// Comma separated keys (hex digits 0-F) held down for the whole run.
    #[arg(long, value_delimiter = ',', value_parser = parse_key)]
    pub keys: Vec<usize>,

    /// One of off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    pub log_level: log::LevelFilter,
}

fn parse_key(s: &str) -> Result<usize, String> {
    match usize::from_str_radix(s, 16) {
        Ok(key) if key < chip8::KEY_COUNT => Ok(key),
        _ => Err(format!("`{s}` is not a key, expected a hex digit 0-F")),
    }
}
