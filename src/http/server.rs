//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy routes and the function mount
//! - Wire up middleware (tracing, request ID, body limit, CORS, metrics)
//! - Serve an optional static site for everything else
//! - Apply configuration reloads while running
//! - Stop on the shutdown broadcast

use std::sync::Arc;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::functions::function_handler;
use crate::http::handlers::{get_activism, get_news, get_repos, get_score, post_news};
use crate::http::request::{propagate_request_id, request_id_of, set_request_id};
use crate::http::state::{AppState, ServerError};
use crate::observability::metrics;

/// HTTP server for the proxy and the functions.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let state = AppState::new(&config)?;
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config: Arc::new(config),
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/api/repos", get(get_repos))
            .route("/api/news", get(get_news).post(post_news))
            .route("/api/score", get(get_score))
            .route("/api/activism", get(get_activism))
            .layer(CorsLayer::permissive());

        let functions_path = format!("{}/{{name}}", config.functions.prefix);
        let functions = Router::new().route(&functions_path, any(function_handler));

        let mut router = api
            .merge(functions)
            .route_layer(middleware::from_fn(metrics::track_requests));

        if let Some(root) = &config.site.root {
            router = router.fallback_service(ServeDir::new(root));
        }

        router
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id())
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id_of(request),
                        )
                    }))
                    .layer(propagate_request_id()),
            )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configurations received on `config_updates` replace the upstream and
    /// CORS settings; the server stops once `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ProxyConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            functions_prefix = %self.config.functions.prefix,
            "HTTP server starting"
        );

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match state.reload(&config) {
                    Ok(()) => tracing::info!("Configuration reloaded"),
                    Err(e) => tracing::error!(error = %e, "Rejected reloaded configuration"),
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
