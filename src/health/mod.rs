//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! checker.rs:
//!     Periodic timer
//!     → snapshot registry topology
//!     → fan out one probe task per host (client.rs)
//!     → join all probes
//!     → write statuses back, aggregate failures (error.rs)
//! ```
//!
//! # Design Decisions
//! - The probe transport is a trait so the checker can be driven without a network
//! - One cancellation token reaches both the timer wait and every in-flight probe

pub mod checker;
pub mod client;
pub mod error;

pub use checker::{Checker, StatusStore};
pub use client::{HealthClient, HealthResponse, HttpHealthClient, DEFAULT_HEALTH_PATH};
pub use error::{CheckError, CheckerError, ProbeFailure, RoundError};
