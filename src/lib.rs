//! Embedded static assets with content-hash cache busting.
//!
//! Files are bundled into an [`AssetRegistry`] (usually by generated code
//! from `assetgen bundle`). Each asset can be addressed by its plain name or
//! by a cache-busted name carrying the SHA-1 of its content:
//!
//! ```text
//! /css/site.css  ◄──►  /css/site-<40 hex>.css
//! ```
//!
//! The registry can be read directly, through the read-only filesystem in
//! [`vfs`], or over HTTP with [`serve::AssetServer`], which marks
//! cache-busted responses as cacheable for a year.

pub mod asset;
pub mod bundle;
pub mod logger;
pub mod name;
pub mod serve;
pub mod utils;
pub mod vfs;

pub use asset::{Asset, AssetRegistry, ContentHash, RegistryError};
pub use name::{has_name_hash, join_name_hash, trim_name_hash};
