//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → token cancelled
//!         → HTTP server stops accepting and drains
//!         → health checker leaves its wait, in-flight probes abort
//! ```
//!
//! # Design Decisions
//! - One token for every long-running task; no per-task channels
//! - A probe aborted by shutdown is reported like any other probe failure

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
