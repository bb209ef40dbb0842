//! quickdrop CLI application
//!
//! Command-line client for a quickdrop file upload server. Uploads files
//! with live progress, checks passwords, shows server limits, and can
//! wait for download notifications.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use quickdrop::app::QuickdropClient;
use quickdrop::cli::{handle_config, handle_login, handle_upload, Cli, Commands};
use quickdrop::config::AppConfig;
use quickdrop::errors::{AppError, Result};

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("quickdrop v{} starting", env!("CARGO_PKG_VERSION"));

    // Resolve configuration and build the client once for all commands
    let app_config = AppConfig::load(cli.global.config.as_deref()).await?;
    let base_url = app_config.resolve_base_url(cli.global.server.as_deref())?;
    let client = QuickdropClient::with_config(base_url, app_config.client.to_runtime_config())
        .map_err(AppError::Client)?;

    match cli.command {
        Commands::Upload(args) => {
            info!("Executing upload command");
            handle_upload(client, args, cli.global.quiet).await
        }
        Commands::Login(args) => {
            info!("Executing login command");
            handle_login(client, args).await
        }
        Commands::Config(args) => {
            info!("Executing config command");
            handle_config(client, args).await
        }
    }
}

/// Initialize logging based on CLI verbosity flags
fn init_logging(cli: &Cli) {
    let level = if cli.global.very_verbose {
        "debug"
    } else if cli.global.verbose {
        "info"
    } else if cli.global.quiet {
        "error"
    } else {
        quickdrop::constants::logging::DEFAULT_LOG_LEVEL
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quickdrop={level}")));

    fmt().with_env_filter(filter).with_target(false).init();
}
