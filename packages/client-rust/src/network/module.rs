//! Stand-in grade API server with deferred startup.
//!
//! `new()` allocates the student store, `start()` binds the TCP listener,
//! and `serve()` accepts connections until the shutdown future resolves.
//! Binding before serving lets callers learn the OS-assigned port when
//! configured with port 0.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::config::{NetworkConfig, API_PREFIX};
use super::handlers::{create_handler, delete_handler, fetch_all_handler, AppState};
use super::middleware::build_http_layers;
use super::store::StudentStore;

/// Owns the server's listener and student store.
pub struct ServerModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    store: Arc<StudentStore>,
}

impl ServerModule {
    /// Creates a server module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            listener: None,
            store: Arc::new(StudentStore::new()),
        }
    }

    /// Returns a shared reference to the student store.
    #[must_use]
    pub fn store(&self) -> Arc<StudentStore> {
        Arc::clone(&self.store)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `POST /sgt/get` -- read all students
    /// - `POST /sgt/create` -- create one student
    /// - `POST /sgt/delete` -- delete one student
    pub fn build_router(&self) -> Router {
        let state = AppState {
            store: Arc::clone(&self.store),
            config: Arc::new(self.config.clone()),
        };

        let api = Router::new()
            .route("/get", post(fetch_all_handler))
            .route("/create", post(create_handler))
            .route("/delete", post(delete_handler));

        Router::new()
            .nest(API_PREFIX, api)
            .layer(build_http_layers(&self.config))
            .with_state(state)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the configured
    /// port when port 0 is used (OS-assigned ephemeral port).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server
    /// encounters a fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = self
            .listener
            .take()
            .context("start() must be called before serve()")?;
        let router = self.build_router();

        info!("Serving grade API under {}", API_PREFIX);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Grade API stopped");
        Ok(())
    }
}
