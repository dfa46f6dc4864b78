//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Embed static files into Rust source and serve them with cache-busting names
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: assetgen.toml)
    #[arg(short = 'C', long, global = true, default_value = "assetgen.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate Rust source embedding the given files
    #[command(visible_alias = "b")]
    Bundle {
        #[command(flatten)]
        input: InputArgs,

        /// Write generated source to this file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Change to this directory before reading inputs
        #[arg(short = 'd', long = "dir", value_hint = clap::ValueHint::DirPath)]
        dir: Option<PathBuf>,

        /// Name of the generated registry static
        #[arg(long)]
        static_name: Option<String>,

        /// Path under which generated code imports assetgen
        #[arg(long)]
        crate_path: Option<String>,

        /// Gate generated items behind this cargo feature
        #[arg(long)]
        feature: Option<String>,
    },

    /// Serve files over HTTP the way an embedded registry would
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        input: InputArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List assets with their cache-busted names
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Input arguments shared by all subcommands.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Files or directories to include. Defaults to `[bundle] paths` from config.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn input(&self) -> &InputArgs {
        match &self.command {
            Commands::Bundle { input, .. }
            | Commands::Serve { input, .. }
            | Commands::List { input } => input,
        }
    }

    /// Directory to enter before anything else (`bundle -d`).
    pub fn work_dir(&self) -> Option<&PathBuf> {
        match &self.command {
            Commands::Bundle { dir, .. } => dir.as_ref(),
            _ => None,
        }
    }
}
