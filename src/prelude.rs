//! Prelude module for the quickdrop client library
//!
//! Re-exports the most commonly used items, so typical integrations need
//! a single `use quickdrop::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use quickdrop::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let base_url = url::Url::parse("http://localhost:8088").unwrap();
//!     let client = QuickdropClient::new(base_url).map_err(AppError::Client)?;
//!
//!     let source = UploadSource::from_bytes("hello.txt", "hello");
//!     let outcome = client.upload(source, "secret", |pct| println!("{pct}%")).await;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Essential app components
pub use crate::app::{
    ClientConfig, NotificationChannel, PublicConfig, QuickdropClient, UploadFailure,
    UploadOutcome, UploadReceipt, UploadSource,
};

// Application configuration
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{DEFAULT_BASE_URL, ENV_PASSWORD, ENV_SERVER, PASSWORD_HEADER};

// Common external crate re-exports for convenience
pub use tokio;
