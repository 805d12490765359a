//! Metrics collection and exposition.
//!
//! # Metrics
//! - `registry_probes_total` (counter): probe outcomes by `outcome` label
//! - `registry_round_duration_seconds` (histogram): duration of a probing round
//! - `registry_round_failures_total` (counter): rounds that ended with failures
//! - `registry_services` / `registry_hosts` (gauge): current registry size

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::registry::Status;

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one probe; `None` means the probe errored.
pub fn record_probe(status: Option<Status>) {
    let outcome = status.map(|s| s.as_str()).unwrap_or("error");
    ::metrics::counter!("registry_probes_total", "outcome" => outcome).increment(1);
}

/// Record a finished probing round.
pub fn record_round(elapsed: Duration, failures: usize) {
    ::metrics::histogram!("registry_round_duration_seconds").record(elapsed.as_secs_f64());
    if failures > 0 {
        ::metrics::counter!("registry_round_failures_total").increment(1);
    }
}

pub fn record_registry_size(services: usize, hosts: usize) {
    ::metrics::gauge!("registry_services").set(services as f64);
    ::metrics::gauge!("registry_hosts").set(hosts as f64);
}
