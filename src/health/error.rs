//! Health check error definitions.

use std::fmt;

use thiserror::Error;
use tokio::task::JoinError;

/// Errors produced by a single health probe.
///
/// A probe that gets an HTTP response with a non-200 code is not an error; it
/// reports `Status::Down` instead.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The health URL could not be built from the host.
    #[error("invalid health url for host {host}: {source}")]
    InvalidUrl {
        host: String,
        #[source]
        source: url::ParseError,
    },

    /// The request was aborted by the shared cancellation token.
    #[error("health request to {0} cancelled")]
    Cancelled(String),

    /// Connection, timeout or protocol failure.
    #[error("health request to {host} failed: {source}")]
    Transport {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 200 response whose body is not a valid health document.
    #[error("invalid health response from {host}: {source}")]
    Decode {
        host: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A failed task of a probing round.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("service {service_id}: {source}")]
    Probe {
        service_id: String,
        host: String,
        #[source]
        source: CheckError,
    },

    /// The probe task panicked or was aborted before reporting.
    #[error("probe task failed: {0}")]
    Task(#[from] JoinError),
}

/// Aggregate of every failure collected in one probing round.
#[derive(Debug)]
pub struct RoundError {
    failures: Vec<ProbeFailure>,
}

impl RoundError {
    pub(crate) fn new(failures: Vec<ProbeFailure>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[ProbeFailure] {
        &self.failures
    }
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for RoundError {}

/// Reasons the checker loop stops.
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("health checker cancelled")]
    Cancelled,

    #[error("health check round failed: {0}")]
    Round(#[from] RoundError),
}

impl CheckerError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CheckerError::Cancelled)
    }
}
