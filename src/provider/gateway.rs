//! Production [`ServingProvider`] backed by the images API and S3.

use async_trait::async_trait;
use aws_sdk_s3::Client;

use crate::error::ProviderError;

use super::{derive_blob_key, ImagesApiClient, ServingProvider};

/// Adapter combining the image-serving subsystem client and the object
/// store client behind the [`ServingProvider`] seam.
///
/// The file name passed to each operation is the object key within the
/// configured bucket; the same key correlates the storage object, the
/// derived blob key, and the serving URL.
///
/// # Example
///
/// ```ignore
/// use serving_url_gateway::provider::{create_s3_client, GatewayProvider, ImagesApiClient};
///
/// let s3 = create_s3_client(None, "us-east-1").await;
/// let images = ImagesApiClient::new("https://images.example.com");
/// let provider = GatewayProvider::new(images, s3, "my-bucket".to_string());
///
/// let url = provider.issue_serving_url("photos/cat.png").await?;
/// ```
#[derive(Clone)]
pub struct GatewayProvider {
    images: ImagesApiClient,
    s3: Client,
    bucket: String,
}

impl GatewayProvider {
    /// Create a new provider for the given bucket.
    pub fn new(images: ImagesApiClient, s3: Client, bucket: String) -> Self {
        Self { images, s3, bucket }
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ServingProvider for GatewayProvider {
    async fn issue_serving_url(&self, file_name: &str) -> Result<String, ProviderError> {
        let blob_key = derive_blob_key(&self.bucket, file_name)?;
        self.images.issue(&blob_key).await
    }

    async fn revoke_serving_url(&self, file_name: &str) -> Result<(), ProviderError> {
        let blob_key = derive_blob_key(&self.bucket, file_name)?;
        self.images.revoke(&blob_key).await
    }

    async fn delete_object(&self, file_name: &str) -> Result<(), ProviderError> {
        self.s3
            .delete_object()
            .bucket(&self.bucket)
            .key(file_name)
            .send()
            .await
            .map_err(|e| ProviderError::Storage(e.to_string()))?;

        Ok(())
    }
}
