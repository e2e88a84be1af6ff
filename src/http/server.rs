//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the loader route and static fallback
//! - Wire up middleware (gate, CORS, timeout, request ID, tracing)
//! - Bind server to listener and drain on shutdown

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GateConfig;
use crate::http::loader::{frontend_loader, LoaderPolicy};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::security::pipeline::{gate_middleware, FilterPipeline};

/// HTTP server for the site gate.
pub struct HttpServer {
    router: Router,
    config: GateConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GateConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layer order, outermost first: request ID, tracing, timeout, CORS, gate.
    #[allow(deprecated)]
    fn build_router(config: &GateConfig) -> Router {
        let pipeline = Arc::new(FilterPipeline::from_config(config));
        let policy = Arc::new(LoaderPolicy::from_config(&config.site, &config.loader));

        let static_root = Path::new(&config.site.static_root);
        let index = static_root.join(&config.site.index_file);
        if !index.is_file() {
            tracing::warn!(
                path = %index.display(),
                "Fallback document not found; unmatched paths will return 404"
            );
        }

        let router: Router = Router::new()
            .route(&config.loader.path, get(frontend_loader))
            .with_state(policy)
            .fallback_service(ServeDir::new(static_root).fallback(ServeFile::new(index)))
            .layer(middleware::from_fn_with_state(pipeline, gate_middleware));

        let router = if config.cors.enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        };

        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_root = %self.config.site.static_root,
            allowed_origin = %self.config.site.allowed_origin,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}
