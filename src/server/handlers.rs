//! HTTP request handlers for the serving URL gateway.
//!
//! # Endpoints
//!
//! - `GET /warmup` - Platform warm-up/readiness hook
//! - `GET /servingUrl?imageLocation={key}` - Issue a serving URL
//! - `DELETE /servingUrl?imageLocation={key}` - Revoke the serving URL and
//!   delete the backing object

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::error;

use crate::provider::ServingProvider;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the serving provider.
///
/// This is passed to all handlers via Axum's State extractor. The state is
/// constructed once at startup; handlers never touch process-global state.
pub struct AppState<P: ServingProvider> {
    /// The provider fronting the image-serving subsystem and object storage
    pub provider: Arc<P>,
}

impl<P: ServingProvider> AppState<P> {
    /// Create a new application state with the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

impl<P: ServingProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for both `/servingUrl` methods.
#[derive(Debug, Deserialize)]
pub struct ServingUrlQueryParams {
    /// Object key of the image inside the configured bucket
    #[serde(rename = "imageLocation", default)]
    pub image_location: Option<String>,
}

impl ServingUrlQueryParams {
    /// Get the image location, treating an empty value as absent.
    fn file_name(&self) -> Option<&str> {
        self.image_location.as_deref().filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle warm-up requests from the hosting platform.
///
/// # Endpoint
///
/// `GET /warmup`
///
/// Configuration is resolved eagerly before the listener binds, so this has
/// nothing left to initialize. It exists so the platform health checker gets
/// a 200 as soon as the gateway is able to serve traffic.
pub async fn warmup_handler() -> StatusCode {
    StatusCode::OK
}

/// Handle serving URL creation.
///
/// # Endpoint
///
/// `GET /servingUrl?imageLocation={key}`
///
/// # Response
///
/// - `200 OK`: body is exactly the serving URL string
/// - `400 Bad Request`: missing or empty `imageLocation`; empty body
/// - `404 Not Found`: key derivation or URL issuance failed; body names the
///   image without exposing upstream detail
///
/// This call only issues a URL for an object assumed to already exist; it
/// has no side effect on the object itself.
pub async fn create_serving_url_handler<P: ServingProvider>(
    State(state): State<AppState<P>>,
    Query(query): Query<ServingUrlQueryParams>,
) -> Response {
    let Some(file_name) = query.file_name() else {
        return (StatusCode::BAD_REQUEST, "").into_response();
    };

    match state.provider.issue_serving_url(file_name).await {
        Ok(url) => (StatusCode::OK, url).into_response(),
        Err(err) => {
            error!(file_name, "Creating serving URL failed with error: {err}");
            (
                StatusCode::NOT_FOUND,
                format!(
                    "Could not create serving URL for image {}, please retry\n",
                    file_name
                ),
            )
                .into_response()
        }
    }
}

/// Handle serving URL deletion.
///
/// # Endpoint
///
/// `DELETE /servingUrl?imageLocation={key}`
///
/// Two stages in strict order: revoke the serving URL, then delete the
/// backing object. The ordering is deliberate policy: a servable URL must
/// never outlive its backing object, so a failure between the stages leaves
/// an orphaned object with no valid URL (recoverable by retrying the
/// delete) rather than a valid URL pointing at a deleted object. There is
/// no compensating rollback of stage 1 when stage 2 fails.
///
/// # Response
///
/// - `200 OK`: both stages completed; confirmation text
/// - `400 Bad Request`: missing or empty `imageLocation`
/// - `500 Internal Server Error`: either stage failed; retry-suggesting
///   body naming the image. Stage 2 is never attempted after a stage 1
///   failure.
pub async fn delete_serving_url_handler<P: ServingProvider>(
    State(state): State<AppState<P>>,
    Query(query): Query<ServingUrlQueryParams>,
) -> Response {
    let Some(file_name) = query.file_name() else {
        return (
            StatusCode::BAD_REQUEST,
            "No image location in request query\n",
        )
            .into_response();
    };

    if let Err(err) = state.provider.revoke_serving_url(file_name).await {
        error!(file_name, "Deleting serving URL failed with error: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!(
                "Could not delete serving URL for image {}, please retry\n",
                file_name
            ),
        )
            .into_response();
    }

    if let Err(err) = state.provider.delete_object(file_name).await {
        error!(file_name, "Deleting image failed with error: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Could not delete image {}, please retry\n", file_name),
        )
            .into_response();
    }

    (StatusCode::OK, "Image and serving URL deleted\n").into_response()
}

/// Fallback for unsupported methods on `/servingUrl`.
///
/// The original platform contract returns 404 (not 405) for anything other
/// than GET and DELETE on this path.
pub async fn method_not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

// =============================================================================
// Tests
// =============================================================================
