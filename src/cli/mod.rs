//! Command-line interface module.

mod args;

pub use args::{Cli, Commands};

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use assetgen::{AssetRegistry, bundle, log, serve};

use crate::config::AssetgenConfig;

/// Generate registry source from the configured inputs.
pub fn run_bundle(config: &AssetgenConfig) -> Result<()> {
    enter_root(config)?;
    let files = bundle::expand_paths(&config.bundle.paths)?;
    let assets = bundle::load_assets(&files)?;
    let options = config.bundle.options();

    match &config.bundle.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            bundle::write_registry(&mut writer, &assets, &options)?;
            writer.flush()?;
            log!("bundle"; "{} assets -> {}", assets.len(), path.display());
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            bundle::write_registry(&mut writer, &assets, &options)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Serve the configured inputs until Ctrl+C.
pub fn run_serve(config: &AssetgenConfig) -> Result<()> {
    let registry = load(config)?;
    serve::run(registry, config.serve.interface, config.serve.port)
}

/// Print `name  hashed-name  size` for every asset.
pub fn run_list(config: &AssetgenConfig) -> Result<()> {
    let registry = load(config)?;
    let width = registry.names().map(str::len).max().unwrap_or(0);

    let mut out = BufWriter::new(io::stdout().lock());
    for asset in registry.iter() {
        writeln!(
            out,
            "{:<width$}  {}  {}",
            asset.name(),
            asset.hashed_name(),
            asset.size()
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Build the registry in memory. It lives until the process exits.
fn load(config: &AssetgenConfig) -> Result<&'static AssetRegistry> {
    enter_root(config)?;
    let registry = bundle::load_registry(&config.bundle.paths)?;
    Ok(Box::leak(Box::new(registry)))
}

/// Input paths are relative to the config root; asset names derive from them.
fn enter_root(config: &AssetgenConfig) -> Result<()> {
    let root = config.root();
    if root.as_os_str().is_empty() {
        return Ok(());
    }
    std::env::set_current_dir(root).with_context(|| format!("enter {}", root.display()))
}
