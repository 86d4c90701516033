//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all invocation handler
//! - Wire up middleware (tracing)
//! - Bind server to listener and stop on the shutdown broadcast
//! - Translate each request, invoke the function, write its response
//! - Observability (metrics, access log)

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{request::Parts, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::event::ProxyRequest;
use crate::http::error::GatewayError;
use crate::http::request::connection_host;
use crate::invoke::InvocationClient;
use crate::observability::access::AccessLogEntry;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<InvocationClient>,
    pub max_body_bytes: usize,
    pub access_log: bool,
}

impl AppState {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            client: Arc::new(InvocationClient::new(&config.backend)),
            max_body_bytes: config.listener.max_body_bytes,
            access_log: config.observability.access_log,
        }
    }
}

/// HTTP front end of the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(invoke_handler))
            .route("/{*path}", any(invoke_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Router serving the gateway, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are allowed to finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.backend.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Catch-all handler: one function invocation per request.
async fn invoke_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let host = connection_host(&parts);

    tracing::debug!(
        method = %parts.method,
        path = %parts.uri.path(),
        "Invoking function for request"
    );

    let (response, body_len) = match forward(&state, &parts, body).await {
        Ok(done) => done,
        Err(err) => {
            tracing::error!(
                method = %parts.method,
                path = %parts.uri.path(),
                error = %err,
                "Request failed"
            );
            metrics::record_failure(err.kind());
            let body_len = err.public_message().len();
            (err.into_response(), body_len)
        }
    };

    metrics::record_request(parts.method.as_str(), response.status().as_u16(), start_time);

    if state.access_log {
        AccessLogEntry {
            host: &host,
            method: parts.method.as_str(),
            path: parts.uri.path(),
            status: response.status().as_u16(),
            body_len,
        }
        .emit();
    }

    response
}

/// Read, translate, invoke, map. Returns the response and the length of the
/// function's body text.
async fn forward(
    state: &AppState,
    parts: &Parts,
    body: Body,
) -> Result<(Response, usize), GatewayError> {
    let body: Bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(GatewayError::ReadBody)?;

    let event = ProxyRequest::from_http(parts, &body);
    let reply = state.client.invoke(&event).await?;

    let body_len = reply.body.len();
    let response = reply.into_http()?;
    Ok((response, body_len))
}
