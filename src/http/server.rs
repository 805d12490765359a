//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the registry handlers
//! - Wire up middleware (tracing, timeouts, body limits, request ID)
//! - Spawn the health checker next to the listener
//! - Stop both on the shared shutdown token

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RegistryConfig;
use crate::health::{Checker, HttpHealthClient};
use crate::http::handlers::{get_host_statuses, health, register_host, remove_host};
use crate::lifecycle::Shutdown;
use crate::registry::Store;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build health check client: {0}")]
    HealthClient(#[from] reqwest::Error),
}

/// HTTP server for the registry.
pub struct RegistryServer {
    router: Router,
    config: RegistryConfig,
    store: Arc<Store>,
}

impl RegistryServer {
    /// Create a server around a fresh, empty store.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_store(config, Arc::new(Store::new()))
    }

    /// Create a server around an existing store.
    pub fn with_store(config: RegistryConfig, store: Arc<Store>) -> Self {
        let state = AppState {
            store: store.clone(),
        };
        let router = build_router(&config, state);

        Self {
            router,
            config,
            store,
        }
    }

    /// The store served by this instance.
    pub fn store(&self) -> Arc<Store> {
        self.store.clone()
    }

    /// Serve on `listener` until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let checker = self.spawn_checker(&shutdown)?;

        let signal = shutdown.clone();
        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { signal.wait().await })
            .await;

        // The checker must not outlive the listener, even when serving failed.
        shutdown.trigger();
        if let Some(task) = checker {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Health checker task panicked");
            }
        }

        served?;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    fn spawn_checker(&self, shutdown: &Shutdown) -> Result<Option<JoinHandle<()>>, ServerError> {
        let config = &self.config.health_check;
        if !config.enabled {
            tracing::info!("Active health checks disabled");
            return Ok(None);
        }

        let client = HttpHealthClient::new(config.timeout(), config.path.clone())?;
        let checker = Checker::new(self.store.clone(), client, config.interval());
        let token = shutdown.token();

        Ok(Some(tokio::spawn(async move {
            match checker.run(&token).await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() || token.is_cancelled() => {
                    tracing::info!("Health checker stopped");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Health checker stopped; host statuses are no longer refreshed");
                }
            }
        })))
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &RegistryConfig, state: AppState) -> Router {
    Router::new()
        .route("/service-id/register", post(register_host))
        .route("/service-id/remove", post(remove_host))
        .route("/service-id/{service_id}", get(get_host_statuses))
        .route("/health", get(health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
                .layer(TimeoutLayer::new(config.timeouts.request())),
        )
}
