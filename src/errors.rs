//! Error types for the quickdrop client
//!
//! This module defines error types for all components of the application.
//! Note that the public operations on [`crate::app::QuickdropClient`]
//! deliberately never surface these to their callers: config fetches fall
//! back to defaults, password checks collapse to a boolean, and uploads
//! resolve to a tagged [`crate::app::UploadOutcome`]. The types here cover
//! the layers that do propagate errors (application config, CLI plumbing,
//! upload source construction) and internal classification.

use std::path::PathBuf;
use thiserror::Error;

/// HTTP transport and request errors
///
/// Only client construction can surface this; the request paths
/// normalize their failures instead of propagating them.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP client construction or transport failure
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),
}

/// Upload source construction errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// File could not be opened or read
    #[error("Failed to read upload source")]
    Io(#[from] std::io::Error),

    /// Path has no usable file name component
    #[error("Path has no file name: {}", path.display())]
    NoFileName { path: PathBuf },
}

/// Notification channel errors
///
/// WebSocket connect and read failures are logged inside the channel
/// task rather than surfaced, so URL construction is the only fallible
/// step left.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Notification URL could not be built from the server base URL
    #[error("Invalid notification URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

/// Application configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// I/O error reading or writing the configuration file
    #[error("Configuration I/O error")]
    Io(#[from] std::io::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP client error
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Upload source error
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Notification channel error
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Client(_) => "network",
            AppError::Source(_) => "source",
            AppError::Notify(_) => "notify",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Client result type alias
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Notification result type alias
pub type NotifyResult<T> = std::result::Result<T, NotifyError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = AppError::Notify(NotifyError::InvalidUrl {
            url: "not a url".to_string(),
            error: "relative URL without a base".to_string(),
        });
        assert_eq!(err.category(), "notify");

        let err = AppError::Config(ConfigError::NotFound {
            path: PathBuf::from("/missing/config.toml"),
        });
        assert_eq!(err.category(), "config");

        let err = AppError::generic("boom");
        assert_eq!(err.category(), "generic");
    }

    #[test]
    fn test_error_display() {
        let err = NotifyError::InvalidUrl {
            url: "ftp://share".to_string(),
            error: "unsupported scheme".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid notification URL: ftp://share - unsupported scheme"
        );

        let err = ConfigError::NotFound {
            path: PathBuf::from("/etc/quickdrop/config.toml"),
        };
        assert!(err.to_string().contains("/etc/quickdrop/config.toml"));
    }
}
