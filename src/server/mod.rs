// Mendy - Web UI Server Module
// Serves the two-tab page, the export downloads, and a small JSON API

mod handlers;
pub mod pages;

pub use handlers::{create_router, health_check, metrics_endpoint, AppError};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;

use crate::service::AssistantService;

/// Web server state shared by all handlers
pub struct AssistantServer {
    service: AssistantService,
    bind_address: String,
    started_at: Instant,
}

impl AssistantServer {
    pub fn new(service: AssistantService, bind_address: impl Into<String>) -> Self {
        Self {
            service,
            bind_address: bind_address.into(),
            started_at: Instant::now(),
        }
    }

    /// Router with request tracing, ready to serve or to drive from tests
    pub fn into_router(self) -> axum::Router {
        create_router(Arc::new(self)).layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_address))?;

        let app = self.into_router();

        tracing::info!("Starting Mendy web UI on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn service(&self) -> &AssistantService {
        &self.service
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
