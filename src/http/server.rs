//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for `/candies` and `/admin`
//! - Wire up middleware (timeout, request ID, tracing, metrics)
//! - Serve on a bound listener until shutdown is signalled

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin::{setup_admin_router, AdminState};
use crate::config::RegistryConfig;
use crate::http::candies;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::store::CandyStore;

/// Application state injected into the candy handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CandyStore>,
    pub max_body_size: usize,
}

/// HTTP server for the registry.
pub struct HttpServer {
    router: Router,
    config: RegistryConfig,
    store: Arc<CandyStore>,
}

impl HttpServer {
    /// Create a server backed by a fresh, empty store.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_store(config, Arc::new(CandyStore::new()))
    }

    /// Create a server around an existing store handle.
    pub fn with_store(config: RegistryConfig, store: Arc<CandyStore>) -> Self {
        let state = AppState {
            store: store.clone(),
            max_body_size: config.security.max_body_size,
        };
        let admin = AdminState::new(config.admin.password.clone());

        let router = Self::build_router(&config, state, admin);
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RegistryConfig, state: AppState, admin: AdminState) -> Router {
        let candies = Router::new()
            .route(
                "/candies",
                get(candies::list)
                    .post(candies::create)
                    .fallback(candies::method_not_allowed),
            )
            .route("/candies/random", get(candies::random))
            .route("/candies/{id}", get(candies::get_one))
            .with_state(state);

        candies
            .merge(setup_admin_router(admin))
            .layer(middleware::from_fn(track_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id(request.headers()),
                    )
                }),
            )
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared handle to the backing store.
    pub fn store(&self) -> Arc<CandyStore> {
        self.store.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record per-route request count and latency.
async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_request(method.as_str(), &route, response.status().as_u16(), start);
    response
}
