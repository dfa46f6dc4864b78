//! Immutable asset registry and lookup.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::{Asset, ContentHash};
use crate::name::{join_name_hash, trim_name_hash};

/// Registry construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate asset name `{0}`")]
    Duplicate(String),

    #[error("asset name `{0}` must start with `/`")]
    RelativeName(String),

    #[error("asset `{name}` declares size {size} but holds {actual} bytes")]
    SizeMismatch { name: String, size: u64, actual: u64 },

    #[error("asset `{name}` declares hash {expected} but content hashes to {actual}")]
    HashMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Name → asset map, built once and read-only afterwards.
///
/// Lookups take `&self` only, so a registry can be shared freely between
/// threads without locking.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: Vec<Asset>,
    index: FxHashMap<String, usize>,
}

impl AssetRegistry {
    /// Build a registry, checking every asset invariant.
    pub fn new(assets: impl IntoIterator<Item = Asset>) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for asset in assets {
            validate(&asset)?;
            if registry.index.contains_key(asset.name()) {
                return Err(RegistryError::Duplicate(asset.name().to_string()));
            }
            registry.push(asset);
        }
        Ok(registry)
    }

    /// Build a registry from generated entries without re-hashing content.
    ///
    /// Generated code has already established the invariants; debug builds
    /// still verify them.
    pub fn from_static(assets: &[Asset]) -> Self {
        let mut registry = Self::default();
        for asset in assets {
            debug_assert_eq!(validate(asset), Ok(()));
            debug_assert!(!registry.index.contains_key(asset.name()));
            registry.push(asset.clone());
        }
        registry
    }

    fn push(&mut self, asset: Asset) {
        self.index.insert(asset.name().to_string(), self.assets.len());
        self.assets.push(asset);
    }

    /// Look up by exact canonical name.
    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.index.get(name).map(|&i| &self.assets[i])
    }

    /// Resolve a requested name, falling back to its hash-trimmed form.
    ///
    /// The embedded hash is not compared with the asset's hash: a stale
    /// cache-busted URL still resolves to the current content.
    pub fn resolve(&self, name: &str) -> Option<&Asset> {
        self.get(name).or_else(|| self.get(&trim_name_hash(name)))
    }

    /// Content of the resolved asset.
    pub fn data(&self, name: &str) -> Option<&[u8]> {
        self.resolve(name).map(Asset::data)
    }

    /// Cache-busted name for `name`, or `name` itself when unknown.
    pub fn name_with_hash(&self, name: &str) -> String {
        match self.resolve(name) {
            Some(asset) => join_name_hash(asset.name(), asset.hash()),
            None => name.to_string(),
        }
    }

    /// Canonical names in bundling order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(Asset::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn validate(asset: &Asset) -> Result<(), RegistryError> {
    let name = asset.name();
    if !name.starts_with('/') {
        return Err(RegistryError::RelativeName(name.to_string()));
    }

    let actual = asset.data().len() as u64;
    if asset.size() != actual {
        return Err(RegistryError::SizeMismatch {
            name: name.to_string(),
            size: asset.size(),
            actual,
        });
    }

    let digest = ContentHash::of(asset.data()).to_hex();
    if asset.hash() != digest {
        return Err(RegistryError::HashMismatch {
            name: name.to_string(),
            expected: asset.hash().to_string(),
            actual: digest,
        });
    }
    Ok(())
}
