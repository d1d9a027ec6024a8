//! # Serving URL Gateway
//!
//! An HTTP gateway that converts references to images stored in cloud object
//! storage into publicly servable image URLs, and can later revoke such URLs
//! and delete the underlying object.
//!
//! The gateway is a thin façade: URL issuance and revocation are delegated
//! to an external image-serving subsystem, object deletion to an external
//! object store. It holds no durable state of its own beyond configuration
//! resolved once at startup.
//!
//! ## Operations
//!
//! - `GET /warmup` - warm-up/readiness hook for the hosting platform
//! - `GET /servingUrl?imageLocation={key}` - issue a serving URL for an
//!   object and return it as the response body
//! - `DELETE /servingUrl?imageLocation={key}` - revoke the serving URL,
//!   then delete the backing object; the URL is revoked first so a servable
//!   URL never outlives its object
//!
//! ## Architecture
//!
//! - [`config`] - CLI/env configuration and eager settings resolution
//! - [`provider`] - capability trait over the two external subsystems, plus
//!   the production adapter (images API client + S3)
//! - [`server`] - Axum router and handlers
//! - [`error`] - error taxonomy

pub mod config;
pub mod error;
pub mod provider;
pub mod server;

// Re-export commonly used types
pub use config::{Config, Settings};
pub use error::{ConfigError, ProviderError};
pub use provider::{
    check_bucket_access, create_s3_client, derive_blob_key, GatewayProvider, ImagesApiClient,
    ServingProvider, SERVING_IMAGE_SIZE,
};
pub use server::{create_router, AppState, RouterConfig};
