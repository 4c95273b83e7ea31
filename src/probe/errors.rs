//! # Probe Errors

use std::time::Duration;

use thiserror::Error;

/// Result type for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Reasons a service is reported unreachable
///
/// Every variant is recovered by the reporter and rendered as `false`.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("connection to {target} failed: {reason}")]
    Connect { target: String, reason: String },

    #[error("no answer from {target} within {timeout:?}")]
    Timeout { target: String, timeout: Duration },

    #[error("unexpected reply from {target}: {reply}")]
    Protocol { target: String, reply: String },

    #[error("client unavailable: {0}")]
    Unavailable(String),
}

impl ProbeError {
    pub fn connect(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::Connect {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn protocol(target: impl Into<String>, reply: &str) -> Self {
        Self::Protocol {
            target: target.into(),
            reply: reply.trim_end().to_string(),
        }
    }

    /// Short machine-readable kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Connect { .. } => "connect",
            ProbeError::Timeout { .. } => "timeout",
            ProbeError::Protocol { .. } => "protocol",
            ProbeError::Unavailable(_) => "unavailable",
        }
    }
}
