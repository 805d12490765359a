//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handlers.rs (decode body, validate via request.rs)
//!     → registry store (register / remove / get)
//!     → response.rs (client errors as 400)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{GetHostStatusesResponse, HostRequest};
pub use response::ApiError;
pub use server::{build_router, AppState, RegistryServer, ServerError};
