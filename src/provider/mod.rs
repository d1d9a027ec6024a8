//! Provider abstraction over the two external subsystems.
//!
//! The gateway itself holds no durable state; everything real happens in an
//! external image-serving subsystem (URL issuance and revocation) and an
//! external object store (deletion). This module defines the capability
//! trait the HTTP handlers program against, so tests can substitute a
//! recording fake, plus the blob key derivation both subsystems share.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │         ServingProvider Trait           │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            GatewayProvider              │
//! │  (images API client + S3 object store)  │
//! └─────────────────────────────────────────┘
//! ```

mod gateway;
mod images_api;
mod s3;

pub use gateway::GatewayProvider;
pub use images_api::{ImagesApiClient, SERVING_IMAGE_SIZE};
pub use s3::{check_bucket_access, create_s3_client};

use async_trait::async_trait;

use crate::error::ProviderError;

/// Capability seam over URL issuance, URL revocation, and object deletion.
///
/// Implemented by [`GatewayProvider`] in production and by recording fakes
/// in the integration tests.
#[async_trait]
pub trait ServingProvider: Send + Sync + 'static {
    /// Issue a servable HTTPS URL for an object assumed to already exist.
    ///
    /// Has no side effect on the object itself.
    async fn issue_serving_url(&self, file_name: &str) -> Result<String, ProviderError>;

    /// Revoke a previously issued serving URL.
    async fn revoke_serving_url(&self, file_name: &str) -> Result<(), ProviderError>;

    /// Delete the backing object from storage.
    async fn delete_object(&self, file_name: &str) -> Result<(), ProviderError>;
}

/// Derive the provider-specific blob key for an object.
///
/// The image-serving subsystem addresses objects by a `/gs/{bucket}/{file}`
/// key. Derivation fails for empty components and for file names containing
/// whitespace or control characters, which the subsystem rejects.
pub fn derive_blob_key(bucket: &str, file_name: &str) -> Result<String, ProviderError> {
    if bucket.is_empty() {
        return Err(ProviderError::InvalidKey {
            reason: "bucket name is empty".to_string(),
        });
    }
    if file_name.is_empty() {
        return Err(ProviderError::InvalidKey {
            reason: "file name is empty".to_string(),
        });
    }
    if file_name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ProviderError::InvalidKey {
            reason: format!("file name contains invalid characters: {:?}", file_name),
        });
    }

    Ok(format!("/gs/{}/{}", bucket, file_name))
}

// =============================================================================
// Tests
// =============================================================================
