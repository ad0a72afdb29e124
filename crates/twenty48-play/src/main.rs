mod config;
mod headless;
mod keymap;
mod notice;
mod tui;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::info;
use twenty48_engine::game::Game;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "twenty48", about = "Play 2048 in the terminal")]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,
    /// Seed for tile spawns (overrides the config file)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Read commands (left, right, up, down, reset, save, load, quit) from
    /// stdin and print the board to stdout instead of opening the UI
    #[arg(long)]
    headless: bool,
    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mut config = match &args.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;
    info!("starting with seed {:?}, win tile {}", config.seed, config.win_tile);

    let mut game = Game::new(config.seed, config.win_tile)?;
    if args.headless {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        headless::run(&mut game, stdin.lock(), stdout.lock())
    } else {
        tui::run(game, &config.ui)
    }
}
