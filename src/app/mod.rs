//! Core application components
//!
//! This module contains the client-side building blocks: the HTTP client
//! facade, the WebSocket notification channel, and the dev-proxy routing
//! rules.

pub mod client;
pub mod notify;
pub mod proxy;

// Re-export public types
pub use client::{
    ClientConfig, PublicConfig, QuickdropClient, UploadFailure, UploadOutcome, UploadReceipt,
    UploadSource,
};
pub use notify::NotificationChannel;
pub use proxy::Route;
