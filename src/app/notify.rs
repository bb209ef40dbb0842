//! WebSocket download notifications
//!
//! After a successful upload the server can push a `downloaded` event the
//! moment someone retrieves the file. A [`NotificationChannel`] owns one
//! WebSocket connection keyed by file ID and invokes the registered
//! callback once per `downloaded` event it receives — repeated events
//! from the server fire the callback repeatedly, without deduplication.
//!
//! The channel is deliberately one-shot in spirit: transport errors and
//! closure are logged only, and there is no automatic reconnection.
//! Whether a dropped channel should reconnect is an open product
//! question; until it is answered, closure is terminal for a handle.

use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use crate::constants::endpoints;
use crate::errors::{NotifyError, NotifyResult};

/// Inbound notification payload
#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(default)]
    downloaded: bool,
    #[serde(default, rename = "fileID")]
    #[allow(dead_code)]
    file_id: Option<String>,
}

/// Handle to one open notification subscription
///
/// Owns the reader task for a single file ID. Dropping the handle closes
/// the subscription; [`close`](Self::close) does the same explicitly and
/// is safe to call any number of times.
#[derive(Debug)]
pub struct NotificationChannel {
    task: Option<JoinHandle<()>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl NotificationChannel {
    /// Opens a notification subscription for the given file ID
    ///
    /// The connection targets `/ws/<file_id>` on the server, using `wss`
    /// iff the server base URL is `https` (protocol parity). The handle
    /// is returned immediately; connection setup happens on a background
    /// task, and setup failures are logged rather than surfaced — a
    /// handle whose connection failed simply never fires.
    ///
    /// `on_downloaded` is invoked once per received `downloaded` event.
    pub fn connect<F>(base_url: &Url, file_id: &str, on_downloaded: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = match notification_url(base_url, file_id) {
            Ok(url) => {
                let file_id = file_id.to_string();
                Some(tokio::spawn(run_channel(
                    url,
                    file_id,
                    on_downloaded,
                    shutdown_rx,
                )))
            }
            Err(e) => {
                tracing::warn!("Cannot build notification URL: {}", e);
                None
            }
        };

        Self {
            task,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Closes the subscription
    ///
    /// Idempotent: closing an already-closed handle is a no-op, as is
    /// dropping the handle after closing it.
    pub fn close(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already have ended; a dead receiver is fine
            let _ = shutdown.send(());
        }
        self.task.take();
    }

    /// Whether the handle has been explicitly closed
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_none()
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Builds the WebSocket URL for a file's notification endpoint
fn notification_url(base_url: &Url, file_id: &str) -> NotifyResult<Url> {
    let mut url = base_url.clone();

    // Scheme parity with the server URL: https pages talk wss
    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme)
        .map_err(|_| NotifyError::InvalidUrl {
            url: base_url.to_string(),
            error: format!("cannot set scheme {}", scheme),
        })?;
    url.set_path(&format!("{}/{}", endpoints::WS_PATH_PREFIX, file_id));

    Ok(url)
}

/// Decides whether an inbound message is a `downloaded` event
///
/// Malformed payloads are logged and ignored; they never terminate the
/// channel or reach the caller.
fn is_downloaded_event(text: &str) -> bool {
    match serde_json::from_str::<Notification>(text) {
        Ok(notification) => notification.downloaded,
        Err(e) => {
            tracing::warn!("Ignoring malformed notification payload: {}", e);
            false
        }
    }
}

/// Connects and pumps notification messages until shutdown or closure
async fn run_channel<F>(
    url: Url,
    file_id: String,
    on_downloaded: F,
    mut shutdown: oneshot::Receiver<()>,
) where
    F: Fn() + Send + Sync + 'static,
{
    let ws_stream = tokio::select! {
        result = connect_async(url.as_str()) => match result {
            Ok((stream, _)) => stream,
            Err(e) => {
                tracing::warn!("Notification connect failed for file {}: {}", file_id, e);
                return;
            }
        },
        _ = &mut shutdown => return,
    };

    tracing::info!("Notification channel connected for file: {}", file_id);
    let (_write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::debug!("Notification channel closed for file: {}", file_id);
                break;
            }
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    if is_downloaded_event(&text) {
                        tracing::info!("File downloaded: {}", file_id);
                        on_downloaded();
                    }
                }
                Some(Ok(_)) => {
                    // Binary frames and pings carry nothing for us
                }
                Some(Err(e)) => {
                    tracing::warn!("Notification channel error for file {}: {}", file_id, e);
                    break;
                }
                None => {
                    tracing::info!("Notification channel closed by server for file: {}", file_id);
                    break;
                }
            }
        }
    }
}
