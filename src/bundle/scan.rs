//! Input discovery: expand paths to files and load them as assets.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rustc_hash::FxHashSet;

use crate::asset::Asset;
use crate::log;
use crate::utils::path::asset_name;

/// Expand every argument into the regular files it denotes.
///
/// Files are kept as given. Directories are walked recursively in file
/// name order, following symlinks.
pub fn expand_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        bail!("path required");
    }

    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let meta = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
        if !meta.is_dir() {
            files.push(path.to_path_buf());
            continue;
        }

        for entry in WalkDir::new(path).sort(true).follow_links(true) {
            let entry = entry.with_context(|| format!("walk {}", path.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.path());
            }
        }
    }
    Ok(files)
}

/// Read each file into an [`Asset`] named after its path.
///
/// When two paths map to the same name the first one wins.
pub fn load_assets(paths: &[PathBuf]) -> Result<Vec<Asset>> {
    let mut seen = FxHashSet::default();
    let mut assets = Vec::with_capacity(paths.len());

    for path in paths {
        let name = asset_name(path);
        if !seen.insert(name.clone()) {
            log!("bundle"; "skipping duplicate {} ({})", name, path.display());
            continue;
        }

        let data = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let mod_time = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .unwrap_or(UNIX_EPOCH);
        assets.push(Asset::new(&name, data, mod_time));
    }
    Ok(assets)
}
