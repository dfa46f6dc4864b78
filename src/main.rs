//! assetgen - embed static files and serve them with cache-busting names.

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::AssetgenConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    assetgen::serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    assetgen::logger::set_verbose(cli.input().verbose);

    if let Some(dir) = cli.work_dir() {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to enter {}", dir.display()))?;
    }

    let config = AssetgenConfig::load(&cli)?;

    match &cli.command {
        Commands::Bundle { .. } => cli::run_bundle(&config),
        Commands::Serve { .. } => cli::run_serve(&config),
        Commands::List { .. } => cli::run_list(&config),
    }
}
