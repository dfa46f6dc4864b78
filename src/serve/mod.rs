//! HTTP serving of registry assets.
//!
//! [`AssetServer`] maps request paths onto an [`AssetRegistry`], falling
//! back from hash-qualified names to plain ones, and marks hash-qualified
//! responses as cacheable for a year. [`run`] drives it from a `tiny_http`
//! listener.

mod content;
mod handler;
mod lifecycle;
mod request;
mod response;

pub use content::{serve_content, text_response};
pub use handler::{AssetServer, IMMUTABLE_CACHE_CONTROL};
pub use lifecycle::{bind_with_retry, is_shutdown, setup_shutdown_handler};
pub use request::{AssetRequest, AssetResponse, Method};
pub use response::respond;

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tiny_http::{Request, Server};

use crate::asset::AssetRegistry;
use crate::{debug, log};

/// Bind `interface:port` (trying later ports if taken) and serve until
/// Ctrl+C.
pub fn run(registry: &'static AssetRegistry, interface: IpAddr, port: u16) -> Result<()> {
    let (server, addr) = bind_with_retry(interface, port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{} ({} assets)", addr, registry.len());
    run_request_loop(&server, AssetServer::new(registry))
}

fn run_request_loop(server: &Server, assets: AssetServer<'static>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        pool.spawn(move || {
            if let Err(e) = handle_request(request, assets) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, assets: AssetServer<'_>) -> std::io::Result<()> {
    if is_shutdown() {
        return respond(request, text_response(503, "server shutting down\n"));
    }

    let mut asset_request = AssetRequest::from_tiny(&request);
    let response = assets.handle(&mut asset_request);
    debug!("serve"; "{} {} -> {}", asset_request.method, asset_request.path, response.status);
    respond(request, response)
}
