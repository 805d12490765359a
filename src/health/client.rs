//! Health probe client.
//!
//! # Responsibilities
//! - Issue one `GET http://<host>/health` per probe
//! - Classify the outcome into a `Status` or a `CheckError`
//!
//! # Classification
//! ```text
//! cannot build url / connect / cancelled  → Err(CheckError)
//! response code != 200                    → Ok(Down), body ignored
//! response code == 200, valid JSON body   → Ok(body.status)
//! response code == 200, bad body          → Err(CheckError::Decode)
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::health::error::CheckError;
use crate::registry::Status;

/// Default path probed on every host.
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Body of a health endpoint response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: Status,
}

/// Capability used by the checker to probe one host.
pub trait HealthClient: Send + Sync + 'static {
    /// Probe `host`, aborting early once `cancel` fires.
    fn check(
        &self,
        host: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Status, CheckError>> + Send;
}

/// `HealthClient` speaking plain HTTP through reqwest.
#[derive(Debug, Clone)]
pub struct HttpHealthClient {
    client: reqwest::Client,
    path: String,
}

impl HttpHealthClient {
    /// Build a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration, path: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .user_agent(concat!("service-registry-health-check/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, path))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: reqwest::Client, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    /// URL probed for `host`.
    pub fn health_url(&self, host: &str) -> Result<Url, CheckError> {
        Url::parse(&format!("http://{}{}", host, self.path)).map_err(|source| {
            CheckError::InvalidUrl {
                host: host.to_string(),
                source,
            }
        })
    }
}

impl HealthClient for HttpHealthClient {
    async fn check(&self, host: &str, cancel: &CancellationToken) -> Result<Status, CheckError> {
        if cancel.is_cancelled() {
            return Err(CheckError::Cancelled(host.to_string()));
        }

        let url = self.health_url(host)?;

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(CheckError::Cancelled(host.to_string())),
            result = self.client.get(url).send() => result.map_err(|source| CheckError::Transport {
                host: host.to_string(),
                source,
            })?,
        };

        if response.status() != StatusCode::OK {
            tracing::debug!(host = %host, code = %response.status(), "Health endpoint returned non-200");
            return Ok(Status::Down);
        }

        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(CheckError::Cancelled(host.to_string())),
            result = response.json::<HealthResponse>() => result.map_err(|source| CheckError::Decode {
                host: host.to_string(),
                source,
            })?,
        };

        Ok(body.status)
    }
}
