//! Upload password validation
//!
//! The server gates uploads behind a shared password sent as a request
//! header. Validation collapses every outcome to a boolean: a 2xx status
//! means the password is accepted, anything else (including transport
//! failures) means it is not. Errors are logged, never surfaced.

use reqwest::Client;
use url::Url;

use crate::constants::{endpoints, headers};

/// Checks the upload password against the server's login endpoint
///
/// Returns `true` iff the server responds with a success status. Any
/// other status or a transport error yields `false`.
pub(crate) async fn validate_password(client: &Client, base_url: &Url, password: &str) -> bool {
    let mut url = base_url.clone();
    url.set_path(endpoints::LOGIN_PATH);

    match client
        .post(url)
        .header(headers::UPLOAD_PASSWORD, password)
        .send()
        .await
    {
        Ok(response) => {
            let valid = response.status().is_success();
            if !valid {
                tracing::debug!(
                    "Password validation rejected with HTTP {}",
                    response.status()
                );
            }
            valid
        }
        Err(e) => {
            tracing::warn!("Password validation request failed: {}", e);
            false
        }
    }
}
