//! HTTP client for the quickdrop upload server
//!
//! This module provides the client facade covering the three HTTP
//! concerns of the server: public configuration retrieval, upload
//! password validation, and the file upload itself.
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `public_config`: server configuration fetch with safe defaults
//! - `auth`: upload password validation
//! - `upload`: multipart upload with progress reporting
//! - `response`: upload response parsing

use tokio::sync::OnceCell;
use url::Url;

use crate::errors::ClientResult;

// Module declarations
pub mod auth;
pub mod config;
pub mod public_config;
pub mod response;
pub mod upload;

// Re-export public types
pub use config::ClientConfig;
pub use public_config::PublicConfig;
pub use response::{UploadFailure, UploadOutcome, UploadReceipt};
pub use upload::UploadSource;

/// Client for one quickdrop server
///
/// All operations are normalizing by design: config retrieval falls back
/// to defaults, password validation collapses to a boolean, and uploads
/// resolve to a tagged [`UploadOutcome`]. Callers never need error
/// handling on these paths.
#[derive(Debug)]
pub struct QuickdropClient {
    http: reqwest::Client,
    base_url: Url,
    public_config: OnceCell<PublicConfig>,
}

impl QuickdropClient {
    /// Creates a new client for the given server with default settings
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if HTTP client creation fails
    pub fn new(base_url: Url) -> ClientResult<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Creates a new client with custom HTTP settings
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server base URL, e.g. `http://localhost:8088`
    /// * `config` - HTTP client configuration settings
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if HTTP client creation fails
    pub fn with_config(base_url: Url, config: ClientConfig) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        tracing::debug!("Created quickdrop client for {}", base_url);

        Ok(Self {
            http,
            base_url,
            public_config: OnceCell::new(),
        })
    }

    /// Fetches the server's public configuration, memoized per client
    ///
    /// The first call issues exactly one request; concurrent and later
    /// calls share its outcome. The `OnceCell` initializer captures the
    /// in-flight future before any awaiting caller can start a second
    /// request, so call concurrency cannot defeat the memoization. The
    /// cached value lives for the client's lifetime and is never
    /// refreshed. Never fails: any fetch problem yields the fixed
    /// default configuration.
    pub async fn public_config(&self) -> PublicConfig {
        self.public_config
            .get_or_init(|| public_config::fetch_public_config(&self.http, &self.base_url))
            .await
            .clone()
    }

    /// Checks an upload password against the server
    ///
    /// Returns `true` iff the server answers with a success status;
    /// `false` on any other status or transport error.
    pub async fn validate_password(&self, password: &str) -> bool {
        auth::validate_password(&self.http, &self.base_url, password).await
    }

    /// Uploads a file and resolves to a terminal outcome
    ///
    /// `on_progress` receives integer percentages in `[0, 100]` computed
    /// from cumulative bytes sent, in non-decreasing order, all strictly
    /// before this future resolves. Sources without a known length
    /// produce no progress events.
    ///
    /// This never returns an error; see [`UploadOutcome`].
    pub async fn upload<F>(
        &self,
        source: UploadSource,
        password: &str,
        on_progress: F,
    ) -> UploadOutcome
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        upload::upload(&self.http, &self.base_url, source, password, on_progress).await
    }

    /// Get the server base URL this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
