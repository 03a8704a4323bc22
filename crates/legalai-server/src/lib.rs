//! legalai-server: application factory and HTTP API.
//!
//! [`create_app`] loads nothing on its own: it takes a finished [`Config`],
//! binds the database, builds the shared [`AppContext`] and registers every
//! route. The returned [`App`] owns all of it and can be served on any
//! listener or handed to tests as a plain [`Router`].

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use std::future::Future;

use axum::Router;
use legalai_core::config::Config;
use legalai_core::{Error, Result};
use legalai_db::pool::DbPool;
use tokio::net::TcpListener;

pub use crate::context::AppContext;

/// A fully configured application: context plus router.
pub struct App {
    context: AppContext,
    router: Router,
}

/// Build the application from `config`.
///
/// Validation warnings are logged, not fatal. Database errors are returned
/// to the caller.
pub fn create_app(config: Config) -> Result<App> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let db = if config.server.in_memory_db() {
        tracing::info!("Using in-memory database");
        legalai_db::pool::init_memory_pool()?
    } else {
        let path = &config.server.db_path;
        let existed = path.exists();
        let pool = legalai_db::pool::init_pool(path)?;
        if existed {
            tracing::info!("Database opened (existing) at {}", path.display());
        } else {
            tracing::info!("Database created (new) at {}", path.display());
        }
        pool
    };

    let context = AppContext::new(db, config);
    let router = router::build_router(context.clone());

    Ok(App { context, router })
}

impl App {
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn config(&self) -> &Config {
        &self.context.config
    }

    pub fn db(&self) -> &DbPool {
        &self.context.db
    }

    /// A clone of the router, e.g. for `tower::ServiceExt::oneshot`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!("Listening on http://{addr}");
        }
        if self.config().server.debug {
            tracing::info!("Debug mode: server errors include their detail in responses");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Build the application, bind `server.host:server.port` and serve.
pub async fn start(config: Config) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;

    let app = create_app(config)?;
    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {host}:{port}: {e}")))?;

    app.serve(listener).await
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
