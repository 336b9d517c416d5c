//! Retouch - ordered, auditable accessibility and performance patches for
//! static html files.

mod cli;
mod config;
mod logger;
mod patch;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(&cli)?;

    match &cli.command {
        Commands::Fix { .. } => cli::fix::run_fix(&config, false),
        Commands::Check { .. } => cli::fix::run_fix(&config, true),
        Commands::Rules => cli::rules::list_rules(&config),
    }
}
