//! `[bundle]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [bundle]
//! paths = ["static", "LICENSE"]   # Files or directories to embed
//! output = "src/assets.rs"        # Generated source (stdout when unset)
//! static_name = "ASSETS"          # Name of the generated registry static
//! crate_path = "::assetgen"       # How generated code imports assetgen
//! feature = "embed"               # Cargo feature gating generated items
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use std::path::PathBuf;

use assetgen::bundle::{BundleOptions, DEFAULT_CRATE_PATH, DEFAULT_STATIC_NAME};
use serde::{Deserialize, Serialize};

/// Bundling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Files or directories to embed.
    pub paths: Vec<PathBuf>,

    /// Destination of generated source.
    pub output: Option<PathBuf>,

    /// Identifier of the generated `pub static`.
    pub static_name: String,

    /// Path used by generated code to import the runtime.
    pub crate_path: String,

    /// Cargo feature gating the generated items.
    pub feature: Option<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            output: None,
            static_name: DEFAULT_STATIC_NAME.to_string(),
            crate_path: DEFAULT_CRATE_PATH.to_string(),
            feature: None,
        }
    }
}

impl BundleConfig {
    pub fn options(&self) -> BundleOptions {
        BundleOptions {
            static_name: self.static_name.clone(),
            crate_path: self.crate_path.clone(),
            feature: self.feature.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_bundle_config() {
        let config = test_parse_config(
            "[bundle]\npaths = [\"static\"]\noutput = \"src/assets.rs\"\nstatic_name = \"WEB\"\nfeature = \"embed\"",
        );

        assert_eq!(config.bundle.paths, [PathBuf::from("static")]);
        assert_eq!(config.bundle.output, Some(PathBuf::from("src/assets.rs")));

        let options = config.bundle.options();
        assert_eq!(options.static_name, "WEB");
        assert_eq!(options.crate_path, DEFAULT_CRATE_PATH);
        assert_eq!(options.feature.as_deref(), Some("embed"));
    }

    #[test]
    fn test_bundle_config_defaults() {
        let config = test_parse_config("");
        assert!(config.bundle.paths.is_empty());
        assert_eq!(config.bundle.options(), BundleOptions::default());
    }
}
