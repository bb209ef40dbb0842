//! Upload response parsing
//!
//! A successful upload returns a plain-text body with line-prefixed
//! fields rather than structured data:
//!
//! ```text
//! File uploaded successfully!
//! Original name: report.pdf
//! File size: 1.2 MB
//! Download URL: http://host/download/<id>
//! cURL command: curl -o "report.pdf" http://host/download/<id>
//! ```
//!
//! The field prefixes and ordering assumptions here are coupled to that
//! undocumented format; a structured (JSON) response contract from the
//! server would make this extraction unnecessary. Until the server grows
//! one, the regexes below mirror the format exactly.

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::upload;

/// Fields extracted from a successful upload response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Original file name as the server recorded it
    pub file_name: String,
    /// Human-readable file size reported by the server
    pub file_size: String,
    /// URL from which the file can be downloaded
    pub download_url: String,
    /// Ready-to-paste cURL download command
    pub curl_command: String,
    /// Opaque file identifier, extracted from the download URL path.
    /// Absent when the URL does not contain a `/download/` segment.
    pub file_id: Option<String>,
}

/// Details of a failed upload attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    /// Human-readable failure message
    pub message: String,
    /// Whether the failure was an invalid upload password
    pub unauthorized: bool,
}

/// Terminal outcome of one upload attempt
///
/// Uploads never surface transport or protocol errors as `Err`; every
/// outcome, including network failure, arrives as a variant of this type
/// so callers need no exception-style handling on the upload path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server accepted the file and returned a parseable receipt
    Completed(UploadReceipt),
    /// The upload did not produce a usable receipt
    Failed(UploadFailure),
}

impl UploadOutcome {
    /// Builds a failure outcome with the given message
    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self::Failed(UploadFailure {
            message: message.into(),
            unauthorized: false,
        })
    }

    /// Builds the fixed invalid-password failure outcome
    pub(crate) fn unauthorized() -> Self {
        Self::Failed(UploadFailure {
            message: upload::UNAUTHORIZED_MESSAGE.to_string(),
            unauthorized: true,
        })
    }

    /// Returns the receipt if the upload completed
    pub fn receipt(&self) -> Option<&UploadReceipt> {
        match self {
            Self::Completed(receipt) => Some(receipt),
            Self::Failed(_) => None,
        }
    }

    /// Whether the upload failed due to an invalid password
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Failed(failure) if failure.unauthorized)
    }
}

fn download_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Download URL: (http\S+)").expect("static regex is valid"))
}

fn curl_command_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"cURL command: (.+)").expect("static regex is valid"))
}

fn original_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Original name: ([^\n]+)").expect("static regex is valid"))
}

fn file_size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"File size: ([^\n]+)").expect("static regex is valid"))
}

fn file_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/download/([^/\s]+)").expect("static regex is valid"))
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parses a 200 response body into a receipt
///
/// The download URL is the anchor field: without it the body is treated
/// as unparseable. The remaining fields default to empty strings when
/// their lines are missing, matching how lenient the format has to be.
pub(crate) fn parse_upload_response(body: &str) -> Option<UploadReceipt> {
    let download_url = capture(download_url_re(), body)?.to_string();

    let curl_command = capture(curl_command_re(), body).unwrap_or_default().to_string();
    let file_name = capture(original_name_re(), body).unwrap_or_default().to_string();
    let file_size = capture(file_size_re(), body).unwrap_or_default().to_string();
    let file_id = capture(file_id_re(), &download_url).map(str::to_string);

    Some(UploadReceipt {
        file_name,
        file_size,
        download_url,
        curl_command,
        file_id,
    })
}

/// Maps a finished upload response to its terminal outcome
///
/// `status_text` is the transport's canonical reason phrase, used as a
/// substitute message when the error body is empty, oversized, or looks
/// like an HTML error page.
pub(crate) fn outcome_for_response(status: u16, status_text: &str, body: &str) -> UploadOutcome {
    match status {
        200 => match parse_upload_response(body) {
            Some(receipt) => {
                tracing::debug!(
                    "Parsed upload receipt for {} ({})",
                    receipt.file_name,
                    receipt.download_url
                );
                UploadOutcome::Completed(receipt)
            }
            None => {
                tracing::warn!("Upload accepted but response body was not parseable");
                UploadOutcome::failed(upload::PARSE_FAILURE_MESSAGE)
            }
        },
        401 => UploadOutcome::unauthorized(),
        _ => {
            let trimmed = body.trim();
            let mut message = if trimmed.is_empty() { status_text } else { trimmed };
            // Long or HTML bodies are almost certainly an error page, not
            // a message worth relaying verbatim
            if message.len() > upload::ERROR_BODY_MAX_LEN || message.contains(upload::HTML_MARKER) {
                message = status_text;
            }
            tracing::warn!("Upload failed with HTTP {}: {}", status, message);
            UploadOutcome::failed(format!("Upload failed: {}", message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BODY: &str = "File uploaded successfully!\n\
        Original name: report.pdf\n\
        File size: 1.2 MB\n\
        Download URL: http://localhost:8088/download/a1b2c3d4\n\
        cURL command: curl -o \"report.pdf\" http://localhost:8088/download/a1b2c3d4\n";

    #[test]
    fn test_parse_full_response() {
        let receipt = parse_upload_response(FULL_BODY).unwrap();
        assert_eq!(receipt.file_name, "report.pdf");
        assert_eq!(receipt.file_size, "1.2 MB");
        assert_eq!(
            receipt.download_url,
            "http://localhost:8088/download/a1b2c3d4"
        );
        assert_eq!(
            receipt.curl_command,
            "curl -o \"report.pdf\" http://localhost:8088/download/a1b2c3d4"
        );
        assert_eq!(receipt.file_id.as_deref(), Some("a1b2c3d4"));
    }

    #[test]
    fn test_parse_missing_download_url() {
        let body = "File uploaded successfully!\nOriginal name: report.pdf\n";
        assert!(parse_upload_response(body).is_none());
    }

    #[test]
    fn test_parse_missing_optional_fields() {
        // Only the download URL is required; the rest default to empty
        let body = "Download URL: http://host/download/xyz\n";
        let receipt = parse_upload_response(body).unwrap();
        assert_eq!(receipt.file_name, "");
        assert_eq!(receipt.file_size, "");
        assert_eq!(receipt.curl_command, "");
        assert_eq!(receipt.file_id.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_parse_file_id_absent_without_download_segment() {
        let body = "Download URL: http://host/files/xyz\n";
        let receipt = parse_upload_response(body).unwrap();
        assert!(receipt.file_id.is_none());
    }

    #[test]
    fn test_outcome_200_parse_failure() {
        let outcome = outcome_for_response(200, "OK", "unexpected body");
        match outcome {
            UploadOutcome::Failed(failure) => {
                assert_eq!(failure.message, upload::PARSE_FAILURE_MESSAGE);
                assert!(!failure.unauthorized);
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_401_unauthorized() {
        let outcome = outcome_for_response(401, "Unauthorized", "Invalid password\n");
        assert!(outcome.is_unauthorized());
        match outcome {
            UploadOutcome::Failed(failure) => {
                assert_eq!(failure.message, upload::UNAUTHORIZED_MESSAGE);
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_server_error_short_body_relayed() {
        let outcome = outcome_for_response(413, "Payload Too Large", "File too large (max: 100 MB)\n");
        match outcome {
            UploadOutcome::Failed(failure) => {
                assert_eq!(failure.message, "Upload failed: File too large (max: 100 MB)");
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_server_error_long_body_substituted() {
        let body = "x".repeat(300);
        let outcome = outcome_for_response(500, "Internal Server Error", &body);
        match outcome {
            UploadOutcome::Failed(failure) => {
                assert_eq!(failure.message, "Upload failed: Internal Server Error");
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_server_error_html_body_substituted() {
        let body = "<html><body>nginx error</body></html>";
        let outcome = outcome_for_response(502, "Bad Gateway", body);
        match outcome {
            UploadOutcome::Failed(failure) => {
                assert_eq!(failure.message, "Upload failed: Bad Gateway");
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_server_error_empty_body_uses_status_text() {
        let outcome = outcome_for_response(503, "Service Unavailable", "  \n");
        match outcome {
            UploadOutcome::Failed(failure) => {
                assert_eq!(failure.message, "Upload failed: Service Unavailable");
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }
}
