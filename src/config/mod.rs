//! Configuration management for `assetgen.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── mod.rs       # AssetgenConfig (root), loading
//! ├── error.rs     # ConfigError
//! ├── util.rs      # find_config_file
//! └── section/
//!     ├── bundle.rs  # [bundle]
//!     └── serve.rs   # [serve]
//! ```
//!
//! The file is optional. Command-line flags override its values.

mod error;
mod section;
mod util;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use assetgen::{debug, log};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands};
pub use error::ConfigError;
pub use section::{BundleConfig, ServeConfig};
use util::find_config_file;

/// Root configuration structure representing assetgen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetgenConfig {
    /// Directory that input paths are relative to
    #[serde(skip)]
    root: PathBuf,

    /// Bundling settings
    pub bundle: BundleConfig,

    /// Asset server settings
    pub serve: ServeConfig,
}

impl AssetgenConfig {
    /// Load configuration for `cli`, searching upward from cwd for the file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cwd, &cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli, &cwd);
        Ok(config)
    }

    /// Directory that `bundle.paths` are relative to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Apply command-line overrides. Paths given on the command line are
    /// relative to `cwd` rather than to the config file.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        let input = cli.input();
        if !input.paths.is_empty() {
            self.bundle.paths = input.paths.clone();
            self.root = cwd.to_path_buf();
        }

        match &cli.command {
            Commands::Bundle {
                output,
                static_name,
                crate_path,
                feature,
                ..
            } => {
                if let Some(output) = output {
                    self.bundle.output = Some(cwd.join(output));
                }
                Self::update_option(&mut self.bundle.static_name, static_name.as_ref());
                Self::update_option(&mut self.bundle.crate_path, crate_path.as_ref());
                if feature.is_some() {
                    self.bundle.feature = feature.clone();
                }
            }
            Commands::Serve { interface, port, .. } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::List { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

/// Parse a config snippet, panicking on error.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AssetgenConfig {
    AssetgenConfig::parse_with_ignored(content)
        .expect("valid config")
        .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_from_str_invalid_toml() {
        let result = AssetgenConfig::parse_with_ignored("[bundle\npaths = []");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_config_default() {
        let config = AssetgenConfig::default();
        assert_eq!(config.root(), Path::new(""));
        assert_eq!(config.bundle.static_name, "ASSETS");
        assert_eq!(config.serve.port, 5277);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[bundle]\npaths = [\"static\"]\nminify = true\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = AssetgenConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.bundle.paths, [PathBuf::from("static")]);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
        assert!(ignored.iter().any(|f| f.contains("minify")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[bundle]\npaths = [\"static\"]\n[serve]\nport = 8000";
        let (_, ignored) = AssetgenConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_cli_overrides_bundle() {
        let mut config = test_parse_config(
            "[bundle]\npaths = [\"static\"]\nstatic_name = \"WEB\"\nfeature = \"embed\"",
        );
        config.root = PathBuf::from("/site");

        let cli = Cli::parse_from(["assetgen", "bundle", "-o", "out.rs", "--crate-path", "crate"]);
        config.apply_cli(&cli, Path::new("/work"));

        // No CLI paths: config paths and root kept
        assert_eq!(config.bundle.paths, [PathBuf::from("static")]);
        assert_eq!(config.root(), Path::new("/site"));
        assert_eq!(config.bundle.output, Some(PathBuf::from("/work/out.rs")));
        assert_eq!(config.bundle.static_name, "WEB");
        assert_eq!(config.bundle.crate_path, "crate");
        assert_eq!(config.bundle.feature.as_deref(), Some("embed"));
    }

    #[test]
    fn test_cli_paths_relative_to_cwd() {
        let mut config = test_parse_config("[bundle]\npaths = [\"static\"]");
        config.root = PathBuf::from("/site");

        let cli = Cli::parse_from(["assetgen", "list", "public"]);
        config.apply_cli(&cli, Path::new("/work"));

        assert_eq!(config.bundle.paths, [PathBuf::from("public")]);
        assert_eq!(config.root(), Path::new("/work"));
    }

    #[test]
    fn test_cli_overrides_serve() {
        let mut config = test_parse_config("[serve]\nport = 8000");
        let cli = Cli::parse_from(["assetgen", "serve", "-i", "0.0.0.0"]);
        config.apply_cli(&cli, Path::new("/work"));

        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.serve.port, 8000);
    }
}
