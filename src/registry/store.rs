//! In-memory registry storage.
//!
//! # Responsibilities
//! - Map service IDs to their hosts and each host's last known status
//! - Hand out snapshot copies, never the live map
//! - Drop a service as soon as its last host is removed
//!
//! # Design Decisions
//! - One readers-writer lock guards the whole map
//! - Every public call is atomic on its own; there are no multi-call transactions
//! - Lock poisoning is ignored: no critical section can leave the map half-updated

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::observability::metrics;
use crate::registry::status::{HostStatus, Status};

type HostStatuses = HashMap<String, Status>;

/// Concurrency-safe `service_id -> {host -> status}` registry.
#[derive(Debug, Default)]
pub struct Store {
    services: RwLock<HashMap<String, HostStatuses>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host under a service, resetting its status to `Unknown`.
    pub fn register(&self, service_id: &str, host: &str) {
        self.put(service_id, host, Status::Unknown);
    }

    /// Insert or overwrite the status of `host` under `service_id`.
    pub fn put(&self, service_id: &str, host: &str, status: Status) {
        let mut services = self.write();
        services
            .entry(service_id.to_string())
            .or_default()
            .insert(host.to_string(), status);

        record_size(&services);
    }

    /// Remove `host` from `service_id`.
    ///
    /// Returns `false` if the pair was not registered. Removing the last host
    /// of a service removes the service itself.
    pub fn remove(&self, service_id: &str, host: &str) -> bool {
        let mut services = self.write();

        let Some(hosts) = services.get_mut(service_id) else {
            return false;
        };
        if hosts.remove(host).is_none() {
            return false;
        }
        if hosts.is_empty() {
            services.remove(service_id);
        }

        record_size(&services);
        true
    }

    /// Snapshot of the hosts registered under `service_id`.
    ///
    /// Unknown services yield an empty list.
    pub fn get(&self, service_id: &str) -> Vec<HostStatus> {
        let services = self.read();
        services
            .get(service_id)
            .map(|hosts| {
                hosts
                    .iter()
                    .map(|(host, status)| HostStatus::new(host.clone(), *status))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of every service and its hosts, statuses omitted.
    pub fn service_topology(&self) -> HashMap<String, Vec<String>> {
        let services = self.read();
        services
            .iter()
            .map(|(service_id, hosts)| (service_id.clone(), hosts.keys().cloned().collect()))
            .collect()
    }

    /// Number of registered services.
    pub fn service_count(&self) -> usize {
        self.read().len()
    }

    /// Number of registered `(service, host)` entries.
    pub fn host_count(&self) -> usize {
        self.read().values().map(HashMap::len).sum()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, HostStatuses>> {
        self.services.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, HostStatuses>> {
        self.services.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn record_size(services: &HashMap<String, HostStatuses>) {
    let hosts: usize = services.values().map(HashMap::len).sum();
    metrics::record_registry_size(services.len(), hosts);
}
