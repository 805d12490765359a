//! Active health checking.
//!
//! # Responsibilities
//! - Periodically probe every registered host
//! - Write each probed status back into the registry
//! - Stop the loop on cancellation or on the first failed round
//!
//! # Round Lifecycle
//! ```text
//! Waiting ──tick──▶ Probing ──all probes joined──▶ Waiting
//!    │                  │
//!    │ cancelled        │ any probe failed
//!    ▼                  ▼
//!  Err(Cancelled)     Err(Round)
//! ```
//!
//! # Design Decisions
//! - A round works on a topology snapshot taken when it starts
//! - Rounds never overlap; ticks missed during a long round are skipped
//! - Failed probes do not touch the registry; they are aggregated and end the loop
//! - A host removed while its probe is in flight gets its status written back anyway

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::health::client::HealthClient;
use crate::health::error::{CheckerError, ProbeFailure, RoundError};
use crate::observability::metrics;
use crate::registry::{Status, Store};

/// The part of the registry the checker reads and writes.
pub trait StatusStore: Send + Sync + 'static {
    /// Snapshot of `service_id -> hosts`.
    fn service_topology(&self) -> HashMap<String, Vec<String>>;

    /// Record the probed status of a host.
    fn put(&self, service_id: &str, host: &str, status: Status);
}

impl StatusStore for Store {
    fn service_topology(&self) -> HashMap<String, Vec<String>> {
        Store::service_topology(self)
    }

    fn put(&self, service_id: &str, host: &str, status: Status) {
        Store::put(self, service_id, host, status)
    }
}

/// Periodic prober of every registered host.
pub struct Checker<S, C> {
    store: Arc<S>,
    client: Arc<C>,
    period: Duration,
}

impl<S: StatusStore, C: HealthClient> Checker<S, C> {
    /// Create a checker probing every `period`.
    ///
    /// # Panics
    /// [`Checker::run`] panics if `period` is zero.
    pub fn new(store: Arc<S>, client: C, period: Duration) -> Self {
        Self {
            store,
            client: Arc::new(client),
            period,
        }
    }

    /// Run rounds until `cancel` fires or a round fails.
    ///
    /// The first round starts one period after the call. Cancellation that
    /// lands while a round is in flight aborts its probes, which surfaces as a
    /// failed round rather than `CheckerError::Cancelled`.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<(), CheckerError> {
        tracing::info!(period_ms = self.period.as_millis() as u64, "Health checker starting");

        let mut ticker = time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Health checker received shutdown signal, exiting loop");
                    return Err(CheckerError::Cancelled);
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.check_all(cancel).await {
                        tracing::error!(failures = e.failures().len(), error = %e, "Health check round failed, stopping checker");
                        return Err(e.into());
                    }
                }
            }
        }
    }

    /// Run a single probing round over a fresh topology snapshot.
    pub async fn check_all(&self, cancel: &CancellationToken) -> Result<(), RoundError> {
        let started = Instant::now();
        let topology = self.store.service_topology();
        let jobs = job_count(&topology);

        tracing::debug!(services = topology.len(), jobs, "Health check round starting");

        let mut tasks = JoinSet::new();
        for (service_id, hosts) in topology {
            for host in hosts {
                let store = self.store.clone();
                let client = self.client.clone();
                let cancel = cancel.clone();
                let service_id = service_id.clone();
                tasks.spawn(async move {
                    check_job(store.as_ref(), client.as_ref(), &cancel, service_id, host).await
                });
            }
        }

        let mut failures = Vec::with_capacity(jobs);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(failure)) => failures.push(failure),
                Err(e) => failures.push(ProbeFailure::Task(e)),
            }
        }

        metrics::record_round(started.elapsed(), failures.len());
        tracing::debug!(jobs, failures = failures.len(), elapsed = ?started.elapsed(), "Health check round finished");

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RoundError::new(failures))
        }
    }
}

async fn check_job<S: StatusStore, C: HealthClient>(
    store: &S,
    client: &C,
    cancel: &CancellationToken,
    service_id: String,
    host: String,
) -> Result<(), ProbeFailure> {
    tracing::debug!(service_id = %service_id, host = %host, "Running health check job");

    match client.check(&host, cancel).await {
        Ok(status) => {
            metrics::record_probe(Some(status));
            tracing::info!(service_id = %service_id, host = %host, status = %status, "Health check job finished");
            store.put(&service_id, &host, status);
            Ok(())
        }
        Err(source) => {
            metrics::record_probe(None);
            tracing::warn!(service_id = %service_id, host = %host, error = %source, "Health check job failed");
            Err(ProbeFailure::Probe {
                service_id,
                host,
                source,
            })
        }
    }
}

fn job_count(topology: &HashMap<String, Vec<String>>) -> usize {
    topology.values().map(Vec::len).sum()
}
