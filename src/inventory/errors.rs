//! # Inventory Errors

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Result type for runtime discovery
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Runtime discovery errors
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to launch {binary}: {source}")]
    Launch {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("{binary} exited with {status}: {stderr}")]
    Exit {
        binary: String,
        status: String,
        stderr: String,
    },

    #[error("{binary} did not answer within {timeout:?}")]
    Timeout { binary: String, timeout: Duration },

    #[error("invalid runtime report: {0}")]
    InvalidReport(#[from] serde_json::Error),
}
