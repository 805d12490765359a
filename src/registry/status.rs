//! Host liveness status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Liveness classification of a registered host.
///
/// Every host starts at `Unknown` when registered and is moved to `Healthy`
/// or `Down` by the health checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Unknown,
    Healthy,
    Down,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unknown => "unknown",
            Status::Healthy => "healthy",
            Status::Down => "down",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(host, status)` entry of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStatus {
    pub host: String,
    pub status: Status,
}

impl HostStatus {
    pub fn new(host: impl Into<String>, status: Status) -> Self {
        Self {
            host: host.into(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&Status::Healthy).unwrap(), "\"healthy\"");
        assert_eq!(serde_json::to_string(&Status::Down).unwrap(), "\"down\"");
        assert_eq!(serde_json::to_string(&Status::Unknown).unwrap(), "\"unknown\"");

        let parsed: Status = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(parsed, Status::Down);
    }

    #[test]
    fn test_status_rejects_unlisted_value() {
        assert!(serde_json::from_str::<Status>("\"Healthy\"").is_err());
        assert!(serde_json::from_str::<Status>("\"degraded\"").is_err());
    }

    #[test]
    fn test_host_status_serialization() {
        let entry = HostStatus::new("127.0.0.1:8080", Status::Unknown);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"host": "127.0.0.1:8080", "status": "unknown"}));
    }
}
