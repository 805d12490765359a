//! Request and response bodies of the registry API.
//!
//! # Responsibilities
//! - Define the JSON bodies accepted and returned by the handlers
//! - Validate `service_id` and `host` before anything reaches the store
//!
//! # Design Decisions
//! - A host must be `address:port` with a numeric port; IPv6 addresses are bracketed
//! - Host names are not resolved here; probing decides reachability

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::HostStatus;

/// Body of the register and remove endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRequest {
    pub service_id: String,
    pub host: String,
}

impl HostRequest {
    pub fn new(service_id: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            host: host.into(),
        }
    }

    /// Reject empty service IDs and hosts that are not `address:port`.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.service_id.is_empty() {
            return Err(RequestError::EmptyServiceId);
        }
        validate_host(&self.host)
    }
}

/// Body returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetHostStatusesResponse {
    pub host_statuses: Vec<HostStatus>,
}

/// Validation failures for request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("service_id must not be empty")]
    EmptyServiceId,

    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: &'static str },
}

/// Check that `host` has the shape `address:port`.
pub fn validate_host(host: &str) -> Result<(), RequestError> {
    let invalid = |reason| RequestError::InvalidHost {
        host: host.to_string(),
        reason,
    };

    let (address, port) = if let Some(rest) = host.strip_prefix('[') {
        let (address, port) = rest
            .split_once("]:")
            .ok_or_else(|| invalid("missing port in bracketed address"))?;
        if address.contains(|c: char| c == '[' || c == ']') {
            return Err(invalid("unexpected bracket in address"));
        }
        (address, port)
    } else {
        let (address, port) = host.rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
        if address.contains(':') {
            return Err(invalid("too many colons in address"));
        }
        (address, port)
    };

    if address.is_empty() {
        return Err(invalid("missing address"));
    }
    if address.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@')) {
        return Err(invalid("unexpected character in address"));
    }
    if port.parse::<u16>().is_err() {
        return Err(invalid("port must be a number between 0 and 65535"));
    }

    Ok(())
}
