//! Service registry with active health checking.
//!
//! Clients register the hosts implementing a service, query them, and
//! deregister them; a background checker probes every host's `/health`
//! endpoint and records whether it is up.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;

pub use config::RegistryConfig;
pub use health::Checker;
pub use http::RegistryServer;
pub use lifecycle::Shutdown;
pub use registry::{HostStatus, Status, Store};
