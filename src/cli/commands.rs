//! Command handlers for the quickdrop CLI
//!
//! This module implements the main command handlers that coordinate
//! between CLI arguments and the client library.

use std::env;

use tokio::sync::mpsc;
use tracing::{info, warn};
use url::Url;

use crate::app::{NotificationChannel, QuickdropClient, UploadOutcome, UploadSource};
use crate::cli::{ConfigArgs, LoginArgs, UploadArgs, UploadProgress};
use crate::constants::env as env_constants;
use crate::errors::{AppError, Result};

/// Handle the upload command
///
/// Validates the password, uploads the file with live progress, prints
/// the receipt, and optionally waits for the first download notification.
pub async fn handle_upload(client: QuickdropClient, args: UploadArgs, quiet: bool) -> Result<()> {
    let password = resolve_password(args.password.as_deref())?;

    if !client.validate_password(&password).await {
        return Err(AppError::generic(
            "Upload password rejected (or the server is unreachable)",
        ));
    }

    let server_config = client.public_config().await;
    info!(
        "Server limits: {} MB max, files expire after {} minutes",
        server_config.max_file_size_mb, server_config.file_expiry_minutes
    );

    let source = UploadSource::from_path(&args.file).await?;
    if let Some(length) = source.length() {
        let max_bytes = u64::from(server_config.max_file_size_mb) * 1024 * 1024;
        if length > max_bytes {
            warn!(
                "{} is {} bytes, above the server's {} MB limit; the server will likely reject it",
                source.file_name(),
                length,
                server_config.max_file_size_mb
            );
        }
    }

    let progress = UploadProgress::new(!quiet && !args.no_progress);
    let outcome = client
        .upload(source, &password, progress.callback())
        .await;
    progress.finish();

    match outcome {
        UploadOutcome::Completed(receipt) => {
            if !quiet {
                println!("Uploaded: {} ({})", receipt.file_name, receipt.file_size);
                println!("Download URL: {}", receipt.download_url);
                println!("cURL command: {}", receipt.curl_command);
                println!(
                    "The link expires in {} minutes.",
                    server_config.file_expiry_minutes
                );
            } else {
                println!("{}", receipt.download_url);
            }

            if args.wait {
                wait_for_download(client.base_url(), receipt.file_id.as_deref()).await?;
            }
            Ok(())
        }
        UploadOutcome::Failed(failure) => Err(AppError::generic(failure.message)),
    }
}

/// Handle the login command
///
/// Exit status communicates validity: success for an accepted password,
/// failure otherwise.
pub async fn handle_login(client: QuickdropClient, args: LoginArgs) -> Result<()> {
    let password = resolve_password(args.password.as_deref())?;

    if client.validate_password(&password).await {
        println!("Password accepted.");
        Ok(())
    } else {
        Err(AppError::generic("Invalid password"))
    }
}

/// Handle the config command
pub async fn handle_config(client: QuickdropClient, _args: ConfigArgs) -> Result<()> {
    let config = client.public_config().await;

    println!("Server: {}", client.base_url());
    println!("Max file size: {} MB", config.max_file_size_mb);
    println!("File expiry: {} minutes", config.file_expiry_minutes);
    if config.is_default_password {
        println!("Warning: the server is still using its default password.");
    }
    Ok(())
}

/// Resolves the upload password: flag, then environment, then a prompt
fn resolve_password(explicit: Option<&str>) -> Result<String> {
    if let Some(password) = explicit {
        return Ok(password.to_string());
    }
    if let Ok(password) = env::var(env_constants::PASSWORD) {
        return Ok(password);
    }
    rpassword::prompt_password("Upload password: ").map_err(AppError::Io)
}

/// Blocks until the server reports the file was downloaded once
async fn wait_for_download(base_url: &Url, file_id: Option<&str>) -> Result<()> {
    let Some(file_id) = file_id else {
        warn!("Server response carried no file ID; cannot wait for download");
        return Ok(());
    };

    let (tx, mut rx) = mpsc::channel(4);
    let mut channel = NotificationChannel::connect(base_url, file_id, move || {
        // The event can repeat; a full buffer just means we already know
        let _ = tx.try_send(());
    });

    println!("Waiting for the file to be downloaded (Ctrl-C to stop)...");

    let result = match rx.recv().await {
        Some(()) => {
            println!("File downloaded.");
            Ok(())
        }
        None => Err(AppError::generic(
            "Notification channel closed before a download was observed",
        )),
    };

    channel.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_password_prefers_explicit() {
        let password = resolve_password(Some("from-flag")).unwrap();
        assert_eq!(password, "from-flag");
    }
}
