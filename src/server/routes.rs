//! Router configuration for the serving URL gateway.
//!
//! # Route Structure
//!
//! ```text
//! /warmup       - Warm-up/readiness hook (GET)
//! /_ah/warmup   - Same handler under the hosting platform's path
//! /servingUrl   - Issue (GET) or delete (DELETE) a serving URL;
//!                 other methods return 404
//! ```
//!
//! # Example
//!
//! ```ignore
//! use serving_url_gateway::provider::GatewayProvider;
//! use serving_url_gateway::server::{create_router, RouterConfig};
//!
//! let provider = GatewayProvider::new(images, s3, bucket);
//! let router = create_router(provider, RouterConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    routing::{get, MethodRouter},
    Router,
};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_serving_url_handler, delete_serving_url_handler, method_not_found_handler,
    warmup_handler, AppState,
};
use crate::provider::ServingProvider;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: None, // Allow any origin by default
            enable_tracing: true,
        }
    }
}

impl RouterConfig {
    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `provider` - The serving provider fronting the external subsystems
/// * `config` - Router configuration
///
/// # Returns
///
/// A configured Axum router ready to be served.
pub fn create_router<P>(provider: P, config: RouterConfig) -> Router
where
    P: ServingProvider,
{
    let app_state = AppState::new(provider);
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/warmup", get(warmup_handler))
        .route("/_ah/warmup", get(warmup_handler))
        .route("/servingUrl", serving_url_routes::<P>())
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Method router for `/servingUrl`.
///
/// GET issues, DELETE revokes-and-deletes; every other method falls through
/// to a 404, matching the platform contract for this path.
fn serving_url_routes<P>() -> MethodRouter<AppState<P>>
where
    P: ServingProvider,
{
    get(create_serving_url_handler::<P>)
        .delete(delete_serving_url_handler::<P>)
        .fallback(method_not_found_handler)
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
