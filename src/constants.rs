//! Application constants for the quickdrop client
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Environment variable holding the upload password
    pub const PASSWORD: &str = "QUICKDROP_PASSWORD";

    /// Environment variable overriding the server base URL
    pub const SERVER: &str = "QUICKDROP_SERVER";
}

/// Server endpoints and routing
pub mod endpoints {
    /// Public configuration endpoint
    pub const CONFIG_PATH: &str = "/config";

    /// Password validation endpoint
    pub const LOGIN_PATH: &str = "/login";

    /// Upload endpoint (the server accepts uploads at the root)
    pub const UPLOAD_PATH: &str = "/";

    /// WebSocket notification path prefix; the file ID is appended
    pub const WS_PATH_PREFIX: &str = "/ws";

    /// Path segment preceding the file ID in download URLs
    pub const DOWNLOAD_SEGMENT: &str = "download";

    /// Default server base URL for local development
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8088";
}

/// Request header names
pub mod headers {
    /// Header carrying the upload password on login and upload requests
    pub const UPLOAD_PASSWORD: &str = "X-Upload-Password";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "quickdrop/0.1.0 (upload client)";

    /// Default HTTP request timeout (uploads of large files need headroom)
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 4;
}

/// Upload request and response handling
pub mod upload {
    /// Multipart form field name the server expects for the file part
    pub const FILE_FIELD: &str = "file";

    /// Maximum error-body length relayed to the user verbatim
    pub const ERROR_BODY_MAX_LEN: usize = 200;

    /// Marker used to detect an HTML error page in a response body
    pub const HTML_MARKER: &str = "<html";

    /// Failure message for a 200 response whose body cannot be parsed
    pub const PARSE_FAILURE_MESSAGE: &str = "Upload successful but couldn't parse response";

    /// Failure message for an invalid upload password
    pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid password";

    /// Failure message for a transport-level error
    pub const NETWORK_ERROR_MESSAGE: &str = "Upload failed: Network error";
}

/// Fallback public configuration used when the server cannot be reached
pub mod defaults {
    /// Assume the default password is still in place
    pub const IS_DEFAULT_PASSWORD: bool = true;

    /// File expiry in minutes
    pub const FILE_EXPIRY_MINUTES: u32 = 10;

    /// Maximum accepted file size in megabytes
    pub const MAX_FILE_SIZE_MB: u32 = 100;
}

/// Logging configuration
pub mod logging {
    /// Default log level when no verbosity flag is given
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use endpoints::DEFAULT_BASE_URL;
pub use env::{PASSWORD as ENV_PASSWORD, SERVER as ENV_SERVER};
pub use headers::UPLOAD_PASSWORD as PASSWORD_HEADER;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
