use axum::extract::DefaultBodyLimit;
use axum::{Extension, Router};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse};
use tower_http::LatencyUnit;

pub mod api;
mod config;
mod handlers;
mod health;

pub use config::Config;

use crate::ServiceState;

const API_PREFIX: &str = "/api";
const STATUS_PREFIX: &str = "/_status";

/// Maximum request body size in bytes (1 MiB)
pub const MAX_BODY_SIZE_BYTES: usize = 1024 * 1024;

/// Build the full application router: /_status + /api routes.
pub fn router(config: Config, state: ServiceState) -> Router {
    let log_level = config.log_level;
    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .level(log_level)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    Router::new()
        .nest(STATUS_PREFIX, health::router(state.clone()))
        .nest(API_PREFIX, api::router(state.clone()))
        .fallback(handlers::not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE_BYTES))
        .layer(Extension(config))
        .with_state(state)
        .layer(trace_layer)
}

/// Run the API HTTP server until the shutdown signal fires.
pub async fn run_api(
    config: Config,
    state: ServiceState,
    mut shutdown_rx: watch::Receiver<()>,
) -> Result<(), HttpServerError> {
    let listen_addr = config.listen_addr;
    let router = router(config, state);

    tracing::info!(addr = ?listen_addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("an error occurred running the HTTP server: {0}")]
    ServingFailed(#[from] std::io::Error),
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::net::SocketAddr;

    use axum::body::Body;
    use axum::response::Response;
    use axum::Router;
    use http::{header, Method, Request};
    use tower::ServiceExt;
    use url::Url;

    use crate::database::Database;
    use crate::nonce::{NonceAction, Nonces, DEFAULT_LIFETIME};
    use crate::notes::password::tests::cheap_config;
    use crate::ServiceState;

    pub(crate) async fn test_state() -> ServiceState {
        let database = Database::in_memory().await.unwrap();
        ServiceState::new(
            database,
            cheap_config(),
            Url::parse("https://notes.example.com").unwrap(),
            Nonces::new([3u8; 32], DEFAULT_LIFETIME).unwrap(),
        )
    }

    pub(crate) fn test_router(state: ServiceState) -> Router {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        super::router(super::Config::new(addr), state)
    }

    pub(crate) fn nonce(state: &ServiceState, action: NonceAction) -> String {
        state.nonces().issue(action)
    }

    pub(crate) async fn post_json(router: Router, uri: &str, body: serde_json::Value) -> Response {
        post_raw(router, uri, &body.to_string()).await
    }

    pub(crate) async fn post_raw(router: Router, uri: &str, body: &str) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub(crate) async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub(crate) async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub(crate) async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }
}
