//! Local preview server for the output directory.
//!
//! A lightweight HTTP server built on `tiny_http`:
//!
//! - Static file serving from the output directory
//! - Automatic `index.html` resolution for directories
//! - Fixed extension-to-MIME mapping (cache manifest and wasm included)
//! - Graceful shutdown on Ctrl+C
//!
//! A bind failure (port already in use) is fatal for the invocation and is
//! not retried: the developer asked for a specific port and should be told
//! immediately that it is taken.

use crate::config::DocsConfig;
use crate::log;
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    net::SocketAddr,
    path::Path,
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Start the preview server over the output directory.
///
/// Binds the configured interface and port exactly once, optionally opens
/// the browser at the primary document, then blocks on the accept loop
/// until Ctrl+C.
pub fn serve_site(config: &DocsConfig) -> Result<()> {
    let interface: std::net::IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;
    let addr = SocketAddr::new(interface, config.serve.port);

    if !config.paths.output.is_dir() {
        log!("warn"; "output directory `{}` does not exist yet; run a build first", config.paths.output.display());
    }

    let server =
        Server::http(addr).map_err(|e| anyhow!("Failed to bind {addr}: {e}"))?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "Serving directory {} at http://{}", config.paths.output.display(), addr);

    if config.serve.open {
        let url = format!(
            "http://localhost:{}/{}",
            config.serve.port, config.render.primary
        );
        // Best effort; a headless session simply logs nothing
        let _ = open::that(&url);
    }

    // Handle requests in main thread (blocks until Ctrl+C)
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &config.paths.output) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Request resolution order:
/// 1. Exact file match → serve file
/// 2. Directory with index.html → serve index.html
/// 3. Nothing found → 404
fn handle_request(request: Request, serve_root: &Path) -> Result<()> {
    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(request.url())
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    // Strip query string (e.g., ?t=123456) before resolving path
    let path_without_query = url_path.split('?').next().unwrap_or(&url_path);
    let request_path = path_without_query.trim_matches('/');

    // Reject traversal components rather than canonicalizing
    if request_path.split('/').any(|c| c == "..") {
        return serve_not_found(request);
    }

    let local_path = serve_root.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    serve_not_found(request)
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = content_type_for(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Mapping
// ============================================================================

/// MIME content type from file extension.
///
/// Extensionless files and unrecognized extensions fall back to
/// `application/octet-stream`.
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("manifest") => "text/cache-manifest",
        Some("html") => "text/html",
        Some("png") => "image/png",
        Some("jpg") => "image/jpg",
        Some("svg") => "image/svg+xml",
        Some("css") => "text/css",
        Some("js") => "application/x-javascript",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================
