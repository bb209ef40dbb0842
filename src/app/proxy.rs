//! Dev-server proxy routing rules
//!
//! During development the front-end assets are served by a dev server
//! while the upload backend runs separately. These rules describe which
//! requests the dev server must forward to the backend, so any
//! replacement proxy reproduces the original behavior:
//!
//! - API paths (`/config`, `/login`, `/download`, `/upload`, `/api`) go
//!   to the backend.
//! - `/ws` paths go to the backend as WebSocket upgrades.
//! - POST/PUT to any other path (notably the root) go to the backend,
//!   which accepts uploads at `/`.
//! - Everything else is served as a static asset.
//!
//! This table is dev tooling, not client logic; the runtime client never
//! consults it.

use reqwest::Method;

/// Path prefixes (first segment) always routed to the backend
const BACKEND_PREFIXES: &[&str] = &["config", "login", "download", "upload", "api"];

/// Destination for one incoming dev-server request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Forward to the backend over HTTP
    Backend,
    /// Forward to the backend as a WebSocket upgrade
    BackendWebsocket,
    /// Serve from the static asset tree
    Static,
}

/// Classifies a request the way the original dev-server proxy does
pub fn route(method: &Method, path: &str) -> Route {
    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or("");

    if BACKEND_PREFIXES.contains(&first_segment) {
        return Route::Backend;
    }

    if first_segment == "ws" {
        return Route::BackendWebsocket;
    }

    // Uploads hit the root path; only mutating methods are forwarded so
    // GET still reaches the static assets
    if method == Method::POST || method == Method::PUT {
        return Route::Backend;
    }

    Route::Static
}
