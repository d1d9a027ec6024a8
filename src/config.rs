//! Configuration management for the serving URL gateway.
//!
//! Configuration comes from command-line arguments via clap, with environment
//! variable fallbacks. Settings required by the hosting platform keep their
//! original environment names (`GCS_STORAGE_BUCKET`, `IMAGES_DIR`,
//! `IMAGES_API_ENDPOINT`); infrastructure settings use the `GATEWAY_` prefix.
//!
//! The required external settings are resolved **eagerly** at startup into an
//! immutable [`Settings`] value via [`Config::resolve_settings`], which takes
//! the environment lookup as a parameter so tests can substitute a counting
//! fake. A missing value aborts the process before the listener binds; there
//! is no lazy request-time initialization.

use clap::Parser;

use crate::error::ConfigError;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Environment variable naming the storage bucket.
pub const STORAGE_BUCKET_VAR: &str = "GCS_STORAGE_BUCKET";

/// Environment variable naming the images directory.
pub const IMAGES_DIR_VAR: &str = "IMAGES_DIR";

/// Environment variable naming the image-serving subsystem endpoint.
pub const IMAGES_API_ENDPOINT_VAR: &str = "IMAGES_API_ENDPOINT";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Serving URL Gateway - issues and revokes public serving URLs for images
/// stored in cloud object storage.
///
/// Converts storage object keys into servable HTTPS image URLs via an
/// external image-serving subsystem, and deletes images by revoking the
/// serving URL before removing the backing object.
#[derive(Parser, Debug, Clone)]
#[command(name = "serving-url-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GATEWAY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GATEWAY_PORT")]
    pub port: u16,

    // =========================================================================
    // Required External Settings
    // =========================================================================
    /// Storage bucket containing the image objects.
    ///
    /// Falls back to the GCS_STORAGE_BUCKET environment variable when absent.
    #[arg(long)]
    pub bucket: Option<String>,

    /// Images directory within the bucket.
    ///
    /// Required by the hosting platform; currently not consulted by any
    /// request path. Falls back to the IMAGES_DIR environment variable.
    #[arg(long)]
    pub images_dir: Option<String>,

    /// Base URL of the image-serving subsystem.
    ///
    /// Falls back to the IMAGES_API_ENDPOINT environment variable.
    #[arg(long)]
    pub images_api_endpoint: Option<String>,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Custom S3 endpoint URL for S3-compatible services (MinIO, etc.).
    ///
    /// If not specified, uses the default AWS S3 endpoint.
    #[arg(long, env = "GATEWAY_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region for object storage.
    #[arg(long, default_value = DEFAULT_REGION, env = "GATEWAY_S3_REGION")]
    pub s3_region: String,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GATEWAY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

// =============================================================================
// Resolved Settings
// =============================================================================

/// Immutable settings resolved once at startup and consumed while wiring up
/// the provider.
///
/// Holding these in a value (rather than module-level statics) keeps the
/// handlers free of hidden shared state and lets tests substitute values.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Storage bucket containing the image objects
    pub bucket: String,

    /// Images directory; required by the platform, not read by any handler
    pub images_dir: String,

    /// Base URL of the image-serving subsystem
    pub images_api_endpoint: String,
}

impl Config {
    /// Resolve the required external settings, consulting `lookup` for any
    /// value not supplied as a flag.
    ///
    /// Each environment variable is looked up at most once. Empty values are
    /// treated as missing.
    pub fn resolve_settings<F>(&self, mut lookup: F) -> Result<Settings, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let bucket = resolve_required(self.bucket.as_deref(), STORAGE_BUCKET_VAR, &mut lookup)?;
        let images_dir = resolve_required(self.images_dir.as_deref(), IMAGES_DIR_VAR, &mut lookup)?;
        let images_api_endpoint = resolve_required(
            self.images_api_endpoint.as_deref(),
            IMAGES_API_ENDPOINT_VAR,
            &mut lookup,
        )?;

        if url::Url::parse(&images_api_endpoint).is_err() {
            return Err(ConfigError::Invalid {
                name: IMAGES_API_ENDPOINT_VAR,
                reason: format!("not a valid URL: {}", images_api_endpoint),
            });
        }

        Ok(Settings {
            bucket,
            images_dir,
            images_api_endpoint,
        })
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Take the flag value if present, otherwise look the variable up once.
fn resolve_required<F>(
    flag: Option<&str>,
    var: &'static str,
    lookup: &mut F,
) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    let value = match flag {
        Some(v) => Some(v.to_string()),
        None => lookup(var),
    };

    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingEnv(var)),
    }
}

// =============================================================================
// Tests
// =============================================================================
