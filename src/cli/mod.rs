//! Command-line interface components
//!
//! This module contains CLI-specific code for the quickdrop client,
//! including argument parsing, command handlers, and progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, ConfigArgs, GlobalArgs, LoginArgs, UploadArgs};
pub use commands::{handle_config, handle_login, handle_upload};
pub use progress::UploadProgress;
