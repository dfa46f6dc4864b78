//! Embedded assets and the registry that owns them.
//!
//! # Module Structure
//!
//! - `hash` - SHA-1 content hash
//! - `registry` - Immutable name → asset map with hash-tolerant lookup
//!
//! Assets are created once (by generated code or by the bundler at startup)
//! and never change afterwards, so `hash` always matches `data`.

mod hash;
mod registry;

pub use hash::ContentHash;
pub use registry::{AssetRegistry, RegistryError};

use std::borrow::Cow;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::name::join_name_hash;
use crate::utils::path::prepend_slash;

/// A single embedded file.
#[derive(Debug, Clone)]
pub struct Asset {
    name: Cow<'static, str>,
    hash: Cow<'static, str>,
    size: u64,
    /// Offset from the Unix epoch.
    mod_time: Duration,
    data: Cow<'static, [u8]>,
}

impl Asset {
    /// Build an asset from owned content, computing its hash and size.
    ///
    /// `name` is made absolute-style if it is not already.
    pub fn new(name: &str, data: Vec<u8>, mod_time: SystemTime) -> Self {
        let hash = ContentHash::of(&data).to_hex();
        Self {
            name: Cow::Owned(prepend_slash(name).into_owned()),
            hash: Cow::Owned(hash),
            size: data.len() as u64,
            mod_time: mod_time.duration_since(UNIX_EPOCH).unwrap_or_default(),
            data: Cow::Owned(data),
        }
    }

    /// Asset literal for generated code.
    ///
    /// The caller guarantees that `hash` is the SHA-1 of `data` and that
    /// `size == data.len()`.
    pub const fn from_static(
        name: &'static str,
        hash: &'static str,
        size: u64,
        secs: u64,
        nanos: u32,
        data: &'static [u8],
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            hash: Cow::Borrowed(hash),
            size,
            mod_time: Duration::new(secs, nanos),
            data: Cow::Borrowed(data),
        }
    }

    /// Canonical path, e.g. `/css/site.css`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase hex SHA-1 of the content.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Modification time recorded at bundling time.
    pub fn mod_time(&self) -> SystemTime {
        UNIX_EPOCH + self.mod_time
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Cache-busted name pointing at the current content.
    pub fn hashed_name(&self) -> String {
        join_name_hash(&self.name, &self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_hash_and_size() {
        let asset = Asset::new("/app.js", b"hello world".to_vec(), UNIX_EPOCH);
        assert_eq!(asset.name(), "/app.js");
        assert_eq!(asset.hash(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        assert_eq!(asset.size(), 11);
        assert_eq!(asset.data(), b"hello world");
    }

    #[test]
    fn test_new_prepends_slash() {
        let asset = Asset::new("css/site.css", Vec::new(), UNIX_EPOCH);
        assert_eq!(asset.name(), "/css/site.css");
    }

    #[test]
    fn test_mod_time_roundtrip() {
        let time = UNIX_EPOCH + Duration::new(1_700_000_000, 42);
        let asset = Asset::new("/a.txt", Vec::new(), time);
        assert_eq!(asset.mod_time(), time);

        let asset = Asset::from_static("/a.txt", "", 0, 1_700_000_000, 42, b"");
        assert_eq!(asset.mod_time(), time);
    }

    #[test]
    fn test_hashed_name() {
        let asset = Asset::new("/app.min.js", b"hello world".to_vec(), UNIX_EPOCH);
        assert_eq!(
            asset.hashed_name(),
            "/app-2aae6c35c94fcfb415dbe95f408b9ce91ee846ed.min.js"
        );
    }
}
