//! quickdrop client library
//!
//! A Rust client for the quickdrop password-gated file upload server.
//! Provides public-configuration retrieval with safe defaults, upload
//! password validation, multipart uploads with progress reporting, and a
//! WebSocket channel for download notifications.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
