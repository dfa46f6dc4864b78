//! Asset request handler with hash-based cache policy.

use super::content::{serve_content, text_response};
use super::request::{AssetRequest, AssetResponse};
use crate::asset::AssetRegistry;
use crate::name::has_name_hash;
use crate::utils::path::clean;
use crate::vfs::AssetFile;

/// `Cache-Control` value for hash-qualified paths (one year).
pub const IMMUTABLE_CACHE_CONTROL: &str = "max-age=31536000";

/// Serves registry assets over HTTP.
///
/// Requests whose path carries a content hash get a one-year
/// `Cache-Control`; plain paths get no explicit caching header.
#[derive(Debug, Clone, Copy)]
pub struct AssetServer<'r> {
    registry: &'r AssetRegistry,
}

impl<'r> AssetServer<'r> {
    pub const fn new(registry: &'r AssetRegistry) -> Self {
        Self { registry }
    }

    /// Handle one request.
    ///
    /// `request.path` is rewritten to its absolute form so later consumers
    /// see the same path that was resolved.
    pub fn handle(&self, request: &mut AssetRequest) -> AssetResponse {
        if !request.path.starts_with('/') {
            request.path.insert(0, '/');
        }

        let Some(asset) = self.registry.resolve(&clean(&request.path)) else {
            return text_response(404, "404 page not found\n");
        };

        let mut response = serve_content(
            request,
            asset.name(),
            asset.mod_time(),
            AssetFile::new(asset),
        );
        // Checked on the path as requested, before cleaning
        if has_name_hash(&request.path) {
            response.set_header("Cache-Control", IMMUTABLE_CACHE_CONTROL);
        }
        response
    }
}
