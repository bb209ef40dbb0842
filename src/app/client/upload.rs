//! File upload with progress reporting
//!
//! Uploads are a single multipart POST of the file to the server root,
//! with the upload password in a header. Progress is observed by wrapping
//! the request body in a counting stream: each chunk handed to the
//! transport bumps a cumulative byte counter and fires the caller's
//! callback with an integer percentage. Percentages only fire when the
//! total length is known up front, and they always land strictly before
//! the terminal [`UploadOutcome`] because the body is fully streamed
//! before the response resolves.

use std::fmt;
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use url::Url;

use crate::app::client::response::{outcome_for_response, UploadOutcome};
use crate::constants::{endpoints, headers, upload};
use crate::errors::SourceError;

/// A file payload ready to be uploaded
///
/// Sources built from a path or from in-memory bytes carry a known length
/// and report progress. Sources built from an arbitrary reader have no
/// computable total, so no progress events fire for them.
pub struct UploadSource {
    file_name: String,
    kind: SourceKind,
}

enum SourceKind {
    Bytes(Bytes),
    File { file: tokio::fs::File, length: u64 },
    Reader(Box<dyn AsyncRead + Send + Sync + Unpin + 'static>),
}

impl UploadSource {
    /// Creates a source from in-memory bytes with the given file name
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: SourceKind::Bytes(bytes.into()),
        }
    }

    /// Opens a file on disk as an upload source
    ///
    /// The file name is taken from the path's final component and the
    /// length from its metadata, so progress reporting is available.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the path has no file name component or
    /// the file cannot be opened.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| SourceError::NoFileName {
                path: path.to_path_buf(),
            })?;

        let file = tokio::fs::File::open(path).await?;
        let length = file.metadata().await?.len();

        Ok(Self {
            file_name,
            kind: SourceKind::File { file, length },
        })
    }

    /// Creates a source from an arbitrary reader of unknown length
    ///
    /// No progress events fire for reader-backed sources.
    pub fn from_reader(
        file_name: impl Into<String>,
        reader: impl AsyncRead + Send + Sync + Unpin + 'static,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            kind: SourceKind::Reader(Box::new(reader)),
        }
    }

    /// File name sent to the server
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Payload length in bytes, when known
    pub fn length(&self) -> Option<u64> {
        match &self.kind {
            SourceKind::Bytes(bytes) => Some(bytes.len() as u64),
            SourceKind::File { length, .. } => Some(*length),
            SourceKind::Reader(_) => None,
        }
    }
}

impl fmt::Debug for UploadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadSource")
            .field("file_name", &self.file_name)
            .field("length", &self.length())
            .finish()
    }
}

pin_project! {
    /// Byte stream wrapper that reports cumulative upload percentage
    pub(crate) struct ProgressStream<S, F> {
        #[pin]
        inner: S,
        sent: u64,
        total: u64,
        on_progress: F,
    }
}

impl<S, F> ProgressStream<S, F> {
    pub(crate) fn new(inner: S, total: u64, on_progress: F) -> Self {
        Self {
            inner,
            sent: 0,
            total,
            on_progress,
        }
    }
}

impl<S, F> Stream for ProgressStream<S, F>
where
    S: Stream<Item = io::Result<Bytes>>,
    F: Fn(u8),
{
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        match this.inner.poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                *this.sent += chunk.len() as u64;
                if *this.total > 0 {
                    let pct = (*this.sent as f64 / *this.total as f64 * 100.0).round();
                    (this.on_progress)(pct.clamp(0.0, 100.0) as u8);
                }
                Poll::Ready(Some(Ok(chunk)))
            }
            other => other,
        }
    }
}

/// Builds the multipart file part, attaching progress reporting when the
/// payload length is known
fn build_part<F>(source: UploadSource, on_progress: F) -> Part
where
    F: Fn(u8) + Send + Sync + 'static,
{
    let file_name = source.file_name;
    match source.kind {
        SourceKind::Bytes(bytes) => {
            let total = bytes.len() as u64;
            let stream = ProgressStream::new(
                futures::stream::iter(vec![Ok::<_, io::Error>(bytes)]),
                total,
                on_progress,
            );
            Part::stream_with_length(Body::wrap_stream(stream), total).file_name(file_name)
        }
        SourceKind::File { file, length } => {
            let stream = ProgressStream::new(ReaderStream::new(file), length, on_progress);
            Part::stream_with_length(Body::wrap_stream(stream), length).file_name(file_name)
        }
        SourceKind::Reader(reader) => {
            Part::stream(Body::wrap_stream(ReaderStream::new(reader))).file_name(file_name)
        }
    }
}

/// Performs one upload attempt and maps it to a terminal outcome
///
/// This never returns an error: transport failures, auth rejections and
/// server errors all resolve to [`UploadOutcome::Failed`]. The upload is
/// never reattempted here, including on unparseable 200 responses where
/// the server has already accepted the file.
pub(crate) async fn upload<F>(
    client: &Client,
    base_url: &Url,
    source: UploadSource,
    password: &str,
    on_progress: F,
) -> UploadOutcome
where
    F: Fn(u8) + Send + Sync + 'static,
{
    let mut url = base_url.clone();
    url.set_path(endpoints::UPLOAD_PATH);

    let file_name = source.file_name.clone();
    let form = Form::new().part(upload::FILE_FIELD, build_part(source, on_progress));

    tracing::info!("Uploading {} to {}", file_name, url);

    let response = match client
        .post(url)
        .header(headers::UPLOAD_PASSWORD, password)
        .multipart(form)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Upload transport error: {}", e);
            return UploadOutcome::failed(upload::NETWORK_ERROR_MESSAGE);
        }
    };

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or("Unknown status");
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to read upload response body: {}", e);
            return UploadOutcome::failed(upload::NETWORK_ERROR_MESSAGE);
        }
    };

    outcome_for_response(status.as_u16(), status_text, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::{Arc, Mutex};

    fn chunks(sizes: &[usize]) -> Vec<io::Result<Bytes>> {
        sizes
            .iter()
            .map(|&n| Ok(Bytes::from(vec![0u8; n])))
            .collect()
    }

    #[tokio::test]
    async fn test_progress_four_equal_chunks() {
        // 100 bytes in four 25-byte chunks must report [25, 50, 75, 100]
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let stream = ProgressStream::new(
            futures::stream::iter(chunks(&[25, 25, 25, 25])),
            100,
            move |pct| sink.lock().unwrap().push(pct),
        );
        let collected: Vec<_> = stream.collect().await;

        assert_eq!(collected.len(), 4);
        assert_eq!(*seen.lock().unwrap(), vec![25, 50, 75, 100]);
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_for_uneven_chunks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let stream = ProgressStream::new(
            futures::stream::iter(chunks(&[10, 1, 50, 39])),
            100,
            move |pct| sink.lock().unwrap().push(pct),
        );
        let _: Vec<_> = stream.collect().await;

        let seen = seen.lock().unwrap();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 100);
    }

    #[tokio::test]
    async fn test_progress_silent_with_zero_total() {
        // Unknown totals are modelled as zero; no events may fire
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let stream = ProgressStream::new(futures::stream::iter(chunks(&[25, 25])), 0, move |pct| {
            sink.lock().unwrap().push(pct)
        });
        let _: Vec<_> = stream.collect().await;

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_source_from_bytes() {
        let source = UploadSource::from_bytes("notes.txt", "hello world");
        assert_eq!(source.file_name(), "notes.txt");
        assert_eq!(source.length(), Some(11));
    }

    #[tokio::test]
    async fn test_source_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        tokio::fs::write(&path, vec![7u8; 64]).await.unwrap();

        let source = UploadSource::from_path(&path).await.unwrap();
        assert_eq!(source.file_name(), "payload.bin");
        assert_eq!(source.length(), Some(64));
    }

    #[tokio::test]
    async fn test_source_from_missing_path() {
        let result = UploadSource::from_path("/definitely/not/here.bin").await;
        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[test]
    fn test_source_from_reader_has_no_length() {
        let reader = io::Cursor::new(vec![0u8; 16]);
        let source = UploadSource::from_reader("stream.bin", reader);
        assert_eq!(source.length(), None);
    }
}
