//! Error types.
//!
//! Provider errors never escape the public operations: the resolver turns
//! them into "not found" and the estimator into a heuristic estimate.
//! `DispatchError` is only produced while building a [`crate::dispatcher::Dispatcher`].

use thiserror::Error;

/// Failure talking to a geocoding or routing provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The provider answered but knows no route between the points.
    #[error("no route between the requested points")]
    NoRoute,

    #[error("provider rejected the request with status {status}")]
    Rejected { status: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("unsupported by provider: {0}")]
    Unsupported(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
