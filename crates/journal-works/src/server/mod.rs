//! HTTP server.
//!
//! Serves the `/api` routes and the prebuilt frontend from one axum router.

pub mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::client::CrossrefClient;
use crate::config::Config;

/// Journal works HTTP server.
pub struct Server {
    client: CrossrefClient,
    config: Config,
    frontend_dir: PathBuf,
}

impl Server {
    /// Create a new server.
    ///
    /// # Errors
    ///
    /// Returns error if the Crossref client cannot be built.
    pub fn new(config: Config, frontend_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let client = CrossrefClient::new(config.clone())?;
        Ok(Self { client, config, frontend_dir: frontend_dir.into() })
    }

    /// Build the router without binding a socket.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        routes::create_router(self.client.clone(), self.config.clone(), &self.frontend_dir)
    }

    /// Run the server until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run(self, addr: SocketAddr) -> anyhow::Result<()> {
        let router = self.router();

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("crossref", &self.config.base_url)
            .field("frontend_dir", &self.frontend_dir)
            .finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
