//! Content hashing using SHA-1.
//!
//! The digest only identifies content for cache busting; it is rendered as
//! the 40 hex characters that [`crate::name`] embeds into file names.

use std::fmt;

use sha1::{Digest, Sha1};

/// A 160-bit content hash (SHA-1 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 20]);

impl ContentHash {
    /// Hash a byte slice.
    pub fn of(data: &[u8]) -> Self {
        Self(Sha1::digest(data).into())
    }

    /// Lowercase hex encoding.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
