//! Service registry subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handlers (register / remove / query)
//!     → store.rs (put / remove / get under a readers-writer lock)
//!
//! Health checker (every tick)
//!     → store.rs service_topology() snapshot
//!     → probe each host
//!     → store.rs put(service_id, host, status)
//! ```
//!
//! # Design Decisions
//! - Handlers and the checker never coordinate beyond the store's own lock
//! - Registration always starts a host at `Unknown`
//! - Only explicit deregistration removes a host

pub mod status;
pub mod store;

pub use status::{HostStatus, Status};
pub use store::Store;
