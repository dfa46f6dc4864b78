//! Build-time bundling of files into generated Rust source.
//!
//! # Flow
//!
//! ```text
//! paths ──► expand_paths ──► load_assets ──► write_registry ──► *.rs
//! ```
//!
//! The generated module references this crate by `crate_path` and builds
//! its registry lazily on first use.

mod emit;
mod scan;

pub use emit::write_registry;
pub use scan::{expand_paths, load_assets};

use std::path::Path;

use anyhow::Result;

use crate::asset::AssetRegistry;

/// Default name of the generated registry static.
pub const DEFAULT_STATIC_NAME: &str = "ASSETS";

/// Default path under which generated code finds this crate.
pub const DEFAULT_CRATE_PATH: &str = "::assetgen";

/// Options controlling generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    /// Identifier of the `pub static` registry.
    pub static_name: String,
    /// Path used in the generated `use` item.
    pub crate_path: String,
    /// Cargo feature gating every generated item.
    pub feature: Option<String>,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            static_name: DEFAULT_STATIC_NAME.to_string(),
            crate_path: DEFAULT_CRATE_PATH.to_string(),
            feature: None,
        }
    }
}

/// Expand and load `paths` into a validated registry.
pub fn load_registry<P: AsRef<Path>>(paths: &[P]) -> Result<AssetRegistry> {
    let files = expand_paths(paths)?;
    let assets = load_assets(&files)?;
    Ok(AssetRegistry::new(assets)?)
}
