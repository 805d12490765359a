//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: PORT, CHECK_INTERVAL_MS, ...)
//!     → validation.rs (semantic checks)
//!     → RegistryConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{HealthCheckConfig, ListenerConfig, ObservabilityConfig, RegistryConfig, TimeoutConfig};
pub use validation::ValidationError;
