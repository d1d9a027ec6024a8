//! Test utilities for integration tests.
//!
//! Provides a recording fake of the serving provider so tests can inject
//! per-operation failures and verify which upstream calls were made.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use serving_url_gateway::error::ProviderError;
use serving_url_gateway::provider::ServingProvider;

// =============================================================================
// Recording Mock Provider
// =============================================================================

/// A fake provider that records every call and can fail any operation.
///
/// Clones share the call counters, so a test can keep a handle after moving
/// the provider into the router.
#[derive(Clone)]
pub struct MockProvider {
    serving_url: String,
    fail_issue: bool,
    fail_revoke: bool,
    fail_delete: bool,
    issue_calls: Arc<AtomicUsize>,
    revoke_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            serving_url: "https://example/served/image".to_string(),
            fail_issue: false,
            fail_revoke: false,
            fail_delete: false,
            issue_calls: Arc::new(AtomicUsize::new(0)),
            revoke_calls: Arc::new(AtomicUsize::new(0)),
            delete_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_serving_url(mut self, url: impl Into<String>) -> Self {
        self.serving_url = url.into();
        self
    }

    pub fn failing_issue(mut self) -> Self {
        self.fail_issue = true;
        self
    }

    pub fn failing_revoke(mut self) -> Self {
        self.fail_revoke = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn issue_calls(&self) -> usize {
        self.issue_calls.load(Ordering::SeqCst)
    }

    pub fn revoke_calls(&self) -> usize {
        self.revoke_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServingProvider for MockProvider {
    async fn issue_serving_url(&self, file_name: &str) -> Result<String, ProviderError> {
        self.issue_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_issue {
            return Err(ProviderError::ImagesApi(format!(
                "issuing serving URL for {} failed with status 500",
                file_name
            )));
        }
        Ok(self.serving_url.clone())
    }

    async fn revoke_serving_url(&self, file_name: &str) -> Result<(), ProviderError> {
        self.revoke_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_revoke {
            return Err(ProviderError::ImagesApi(format!(
                "revoking serving URL for {} failed with status 500",
                file_name
            )));
        }
        Ok(())
    }

    async fn delete_object(&self, file_name: &str) -> Result<(), ProviderError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(ProviderError::Storage(format!(
                "delete of {} failed: access denied",
                file_name
            )));
        }
        Ok(())
    }
}
