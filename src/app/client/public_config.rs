//! Public server configuration retrieval
//!
//! The server exposes a small non-sensitive configuration object at
//! `/config`. Retrieval never fails outward: any transport error or
//! non-2xx status falls back to a fixed default, so callers can always
//! render limits without handling errors. Memoization of the fetched
//! value lives on [`crate::app::QuickdropClient`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{defaults, endpoints};

/// Non-sensitive configuration the server exposes to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    /// Whether the server is still running with its default password
    pub is_default_password: bool,
    /// Minutes until an uploaded file expires
    pub file_expiry_minutes: u32,
    /// Maximum accepted file size in megabytes.
    /// camelCase would give "maxFileSizeMb"; the server emits "maxFileSizeMB".
    #[serde(rename = "maxFileSizeMB")]
    pub max_file_size_mb: u32,
}

impl Default for PublicConfig {
    fn default() -> Self {
        Self {
            is_default_password: defaults::IS_DEFAULT_PASSWORD,
            file_expiry_minutes: defaults::FILE_EXPIRY_MINUTES,
            max_file_size_mb: defaults::MAX_FILE_SIZE_MB,
        }
    }
}

impl PublicConfig {
    /// Builds the config endpoint URL for the given server base URL
    pub(crate) fn endpoint(base_url: &Url) -> Url {
        let mut url = base_url.clone();
        url.set_path(endpoints::CONFIG_PATH);
        url
    }
}

/// Fetches the public configuration, falling back to defaults on any failure
///
/// Exactly one request is made per call; the caller is responsible for
/// memoizing the outcome so repeated lookups share a single fetch.
pub(crate) async fn fetch_public_config(client: &Client, base_url: &Url) -> PublicConfig {
    let url = PublicConfig::endpoint(base_url);

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Failed to fetch server config from {}: {}", url, e);
            return PublicConfig::default();
        }
    };

    if !response.status().is_success() {
        tracing::warn!(
            "Server config request returned HTTP {}; using defaults",
            response.status()
        );
        return PublicConfig::default();
    }

    match response.json::<PublicConfig>().await {
        Ok(config) => {
            tracing::debug!("Fetched server config: {:?}", config);
            config
        }
        Err(e) => {
            tracing::warn!("Failed to decode server config: {}; using defaults", e);
            PublicConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = PublicConfig::default();
        assert!(config.is_default_password);
        assert_eq!(config.file_expiry_minutes, 10);
        assert_eq!(config.max_file_size_mb, 100);
    }

    #[test]
    fn test_config_deserialization() {
        // Field names match what the Go server emits
        let json = r#"{"isDefaultPassword": false, "fileExpiryMinutes": 30, "maxFileSizeMB": 250}"#;
        let config: PublicConfig = serde_json::from_str(json).unwrap();
        assert!(!config.is_default_password);
        assert_eq!(config.file_expiry_minutes, 30);
        assert_eq!(config.max_file_size_mb, 250);
    }

    #[test]
    fn test_config_endpoint_url() {
        let base = Url::parse("http://localhost:8088").unwrap();
        let url = PublicConfig::endpoint(&base);
        assert_eq!(url.as_str(), "http://localhost:8088/config");
    }
}
