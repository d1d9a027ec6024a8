use thiserror::Error;

/// Errors raised while resolving configuration at startup.
///
/// All of these are fatal: the gateway must not serve traffic without its
/// required settings.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required environment variable (or equivalent flag) is absent or empty
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),

    /// A setting is present but unusable
    #[error("Invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Errors from the two external subsystems the gateway fronts.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The blob key could not be derived from the bucket and file name
    #[error("Invalid object key: {reason}")]
    InvalidKey { reason: String },

    /// Error from the image-serving subsystem (issue or revoke)
    #[error("Images API error: {0}")]
    ImagesApi(String),

    /// Error from object storage (delete)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Network or connection error reaching either subsystem
    #[error("Connection error: {0}")]
    Connection(String),
}
