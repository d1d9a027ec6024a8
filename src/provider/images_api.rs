//! HTTP client for the external image-serving subsystem.
//!
//! The subsystem issues a public HTTPS URL that serves a resized rendition
//! of a stored image, addressed by blob key, and can later revoke it:
//!
//! - `POST {endpoint}/v1/servingUrl` with a JSON body naming the blob key
//!   and rendition options, returning `{"url": "..."}`.
//! - `DELETE {endpoint}/v1/servingUrl?blobKey={key}` to revoke.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Target rendition size in pixels on the longest edge.
pub const SERVING_IMAGE_SIZE: u32 = 450;

/// Request body for serving URL issuance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IssueRequest<'a> {
    blob_key: &'a str,
    size: u32,
    secure: bool,
}

/// Response body from serving URL issuance.
#[derive(Debug, Deserialize)]
struct IssueResponse {
    url: String,
}

/// Client for the image-serving subsystem.
#[derive(Clone)]
pub struct ImagesApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ImagesApiClient {
    /// Create a client for the subsystem at the given base URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn serving_url_route(&self) -> String {
        format!("{}/v1/servingUrl", self.endpoint)
    }

    /// Issue a serving URL for the given blob key.
    ///
    /// Always requests a secure (HTTPS) URL with the fixed rendition size.
    /// The returned string is validated as a URL before being handed back.
    pub async fn issue(&self, blob_key: &str) -> Result<String, ProviderError> {
        let body = IssueRequest {
            blob_key,
            size: SERVING_IMAGE_SIZE,
            secure: true,
        };

        let response = self
            .http
            .post(self.serving_url_route())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ImagesApi(format!(
                "issuing serving URL for {} failed with status {}",
                blob_key, status
            )));
        }

        let issued: IssueResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ImagesApi(format!("malformed issue response: {}", e)))?;

        validate_issued_url(issued.url)
    }

    /// Revoke a previously issued serving URL.
    pub async fn revoke(&self, blob_key: &str) -> Result<(), ProviderError> {
        let response = self
            .http
            .delete(self.serving_url_route())
            .query(&[("blobKey", blob_key)])
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ImagesApi(format!(
                "revoking serving URL for {} failed with status {}",
                blob_key, status
            )));
        }

        Ok(())
    }
}

/// Check that the subsystem returned a parseable URL, handing back the
/// original string untouched.
///
/// Callers receive the URL byte-for-byte as issued; re-serializing a parsed
/// `url::Url` would normalize it (trailing slash on host-only URLs,
/// lowercased host), which changes what downstream clients store.
fn validate_issued_url(url: String) -> Result<String, ProviderError> {
    url::Url::parse(&url)
        .map_err(|e| ProviderError::ImagesApi(format!("subsystem returned invalid URL: {}", e)))?;

    Ok(url)
}

// =============================================================================
// Tests
// =============================================================================
