mod app;
mod config;
mod render;

use clap::Parser;

use crate::{app::App, config::Config};

fn main() {
    let config = Config::parse();

    if let Err(e) = setup_logger(config.log_level) {
        eprintln!("Failed to set up logging: {e}");
    }

    if let Err(e) = run(&config) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn setup_logger(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn run(config: &Config) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    let ticks = app.run(config.ticks)?;
    log::debug!("Ran {ticks} ticks");

    println!("{}", render::render(app.chip8.graphics()));
    Ok(())
}
