//! Integration tests for the notification channel against a loopback
//! WebSocket server

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use quickdrop::app::NotificationChannel;

/// Starts a one-connection WebSocket server that sends the given text
/// frames and then closes. Returns the base URL to point the client at.
async fn spawn_ws_server(frames: Vec<&'static str>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            let mut ws = accept_async(stream).await.unwrap();
            for frame in frames {
                ws.send(Message::Text(frame.to_string())).await.unwrap();
            }
            // Drain until the client goes away
            while let Some(Ok(_)) = ws.next().await {}
        }
    });

    Url::parse(&format!("http://{}", addr)).unwrap()
}

async fn wait_for_count(counter: &AtomicUsize, expected: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while counter.load(Ordering::SeqCst) < expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("timed out waiting for notification callback");
}

#[tokio::test]
async fn downloaded_event_fires_callback_once() {
    let base_url = spawn_ws_server(vec![r#"{"downloaded": true, "fileID": "abc123"}"#]).await;

    let counter = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&counter);
    let mut channel = NotificationChannel::connect(&base_url, "abc123", move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    wait_for_count(&counter, 1).await;

    // Give the channel a moment to prove it does not fire again
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    channel.close();
}

#[tokio::test]
async fn repeated_downloaded_events_are_not_deduplicated() {
    let base_url = spawn_ws_server(vec![
        r#"{"downloaded": true}"#,
        r#"{"downloaded": true}"#,
    ])
    .await;

    let counter = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&counter);
    let mut channel = NotificationChannel::connect(&base_url, "abc123", move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    wait_for_count(&counter, 2).await;
    channel.close();
}

#[tokio::test]
async fn malformed_payloads_are_ignored_without_crashing() {
    let base_url = spawn_ws_server(vec![
        "not json",
        r#"{"downloaded": false}"#,
        r#"{"downloaded": true}"#,
    ])
    .await;

    let counter = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&counter);
    let mut channel = NotificationChannel::connect(&base_url, "abc123", move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    // Only the final valid event may fire
    wait_for_count(&counter, 1).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    channel.close();
}

#[tokio::test]
async fn closing_twice_does_not_panic() {
    let base_url = spawn_ws_server(vec![]).await;

    let mut channel = NotificationChannel::connect(&base_url, "abc123", || {});
    channel.close();
    channel.close();
    assert!(channel.is_closed());
}

#[tokio::test]
async fn close_before_any_event_stops_the_channel() {
    let base_url = spawn_ws_server(vec![]).await;

    let counter = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&counter);
    let mut channel = NotificationChannel::connect(&base_url, "abc123", move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    channel.close();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_server_yields_a_quiet_handle() {
    // Connection failures are logged, never surfaced; the handle is inert
    let base_url = Url::parse("http://127.0.0.1:1").unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&counter);
    let mut channel = NotificationChannel::connect(&base_url, "abc123", move || {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    channel.close();
}
