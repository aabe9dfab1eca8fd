use crate::dotenv::EnvError;
use thiserror::Error;

/// Top-level error type for the layered-env library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("env loading error: {0}")]
    Dotenv(#[from] EnvError),

    #[error("failed to decode sns event: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("sns handler failed: {0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),
}
