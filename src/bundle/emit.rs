//! Rust source emission for a bundled registry.

use std::io::Write;
use std::sync::LazyLock;
use std::time::UNIX_EPOCH;

use anyhow::{Result, bail};
use regex::Regex;

use super::BundleOptions;
use crate::asset::Asset;

/// Bytes per line inside a data literal.
const BYTES_PER_LINE: usize = 32;

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Identifiers that cannot name a `static`, across editions.
const RESERVED: &[&str] = &[
    "_", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

fn is_valid_static_name(name: &str) -> bool {
    IDENT_RE.is_match(name) && !RESERVED.contains(&name)
}

/// Write a Rust module declaring `pub static <NAME>: LazyLock<AssetRegistry>`
/// holding `assets` as static data.
pub fn write_registry(w: &mut impl Write, assets: &[Asset], options: &BundleOptions) -> Result<()> {
    let name = options.static_name.as_str();
    if !is_valid_static_name(name) {
        bail!("invalid static name `{}`", name);
    }
    let krate = options.crate_path.as_str();
    let cfg = match &options.feature {
        Some(feature) => format!("#[cfg(feature = {feature:?})]\n"),
        None => String::new(),
    };

    writeln!(w, "// Code generated by assetgen.")?;
    writeln!(w, "// DO NOT EDIT.")?;
    writeln!(w)?;
    write!(w, "{cfg}")?;
    writeln!(w, "use {krate}::{{Asset, AssetRegistry}};")?;
    write!(w, "{cfg}")?;
    writeln!(w, "use std::sync::LazyLock;")?;
    writeln!(w)?;

    write!(w, "{cfg}")?;
    writeln!(w, "static {name}_FILES: [Asset; {}] = [", assets.len())?;
    for asset in assets {
        write_asset(w, asset)?;
    }
    writeln!(w, "];")?;
    writeln!(w)?;

    write!(w, "{cfg}")?;
    writeln!(
        w,
        "pub static {name}: LazyLock<AssetRegistry> = LazyLock::new(|| AssetRegistry::from_static(&{name}_FILES));"
    )?;
    Ok(())
}

fn write_asset(w: &mut impl Write, asset: &Asset) -> Result<()> {
    let since = asset.mod_time().duration_since(UNIX_EPOCH).unwrap_or_default();

    writeln!(w, "    Asset::from_static(")?;
    writeln!(w, "        {:?},", asset.name())?;
    writeln!(w, "        {:?},", asset.hash())?;
    writeln!(w, "        {},", asset.size())?;
    writeln!(w, "        {},", since.as_secs())?;
    writeln!(w, "        {},", since.subsec_nanos())?;
    write!(w, "        b\"")?;
    for (i, chunk) in asset.data().chunks(BYTES_PER_LINE).enumerate() {
        // Escaped newline: the literal continues without the break
        if i > 0 {
            write!(w, "\\\n          ")?;
        }
        for byte in chunk {
            write!(w, "\\x{byte:02x}")?;
        }
    }
    writeln!(w, "\",")?;
    writeln!(w, "    ),")?;
    Ok(())
}
