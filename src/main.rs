//! Serving URL Gateway - HTTP façade over an image-serving subsystem and
//! cloud object storage.
//!
//! This binary resolves configuration, checks connectivity, and starts the
//! HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use serving_url_gateway::{
    check_bucket_access, create_s3_client,
    server::{create_router, RouterConfig},
    Config, GatewayProvider, ImagesApiClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Resolve required settings eagerly; the gateway must not serve traffic
    // without them
    let settings = match config.resolve_settings(|var| std::env::var(var).ok()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration:");
    info!("  Storage bucket: {}", settings.bucket);
    info!("  Images directory: {}", settings.images_dir);
    info!("  Images API endpoint: {}", settings.images_api_endpoint);
    if let Some(ref endpoint) = config.s3_endpoint {
        info!("  S3 endpoint: {}", endpoint);
    }
    info!("  S3 region: {}", config.s3_region);

    // Create S3 client and verify the bucket is reachable
    let s3_client = create_s3_client(config.s3_endpoint.as_deref(), &config.s3_region).await;

    info!("Connecting to object storage...");
    if let Err(e) = check_bucket_access(&s3_client, &settings.bucket).await {
        error!("  Failed to reach bucket '{}': {}", settings.bucket, e);
        error!("");
        error!("  Please check:");
        error!("    - Your credentials are configured correctly");
        error!("    - The bucket '{}' exists and is accessible", settings.bucket);
        error!("    - The S3 endpoint is correct (if using MinIO/custom S3)");
        return ExitCode::FAILURE;
    }
    info!("  Connected successfully");

    // Build the provider and router
    let images = ImagesApiClient::new(settings.images_api_endpoint.clone());
    let provider = GatewayProvider::new(images, s3_client, settings.bucket.clone());
    let router = create_router(provider, build_router_config(&config));

    // Bind and serve
    let addr = config.bind_address();

    info!("Server listening on: http://{}", addr);
    info!("  Warm-up:  curl http://{}/warmup", addr);
    info!(
        "  Create:   curl \"http://{}/servingUrl?imageLocation=photos/cat.png\"",
        addr
    );
    info!(
        "  Delete:   curl -X DELETE \"http://{}/servingUrl?imageLocation=photos/cat.png\"",
        addr
    );

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "serving_url_gateway=debug,tower_http=debug"
    } else {
        "serving_url_gateway=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::default().with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
