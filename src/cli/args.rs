//! Command-line argument parsing for the quickdrop client
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// quickdrop - share files through a quickdrop upload server
#[derive(Parser, Debug)]
#[command(
    name = "quickdrop",
    version,
    about = "Upload files to a quickdrop server and watch for downloads",
    long_about = "Client for a password-gated quickdrop file upload server.
Uploads files with live progress, prints the download URL and a ready-to-paste
cURL command, and can wait for the server's download notification."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides config file and environment)
    #[arg(short, long, global = true, value_name = "URL")]
    pub server: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file and print its download details
    Upload(UploadArgs),

    /// Check an upload password against the server
    Login(LoginArgs),

    /// Show the server's public configuration
    Config(ConfigArgs),
}

/// Arguments for the upload command
#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// File to upload
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Upload password (falls back to QUICKDROP_PASSWORD, then a prompt)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Keep running until the file is downloaded once
    #[arg(short, long)]
    pub wait: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the login command
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Password to check (falls back to QUICKDROP_PASSWORD, then a prompt)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the config command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
