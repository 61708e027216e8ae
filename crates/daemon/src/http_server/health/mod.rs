use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

mod data_source;
mod readiness;
mod version;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/livez", get(liveness_handler))
        .route("/readyz", get(readiness::handler))
        .route("/version", get(version::handler))
        .with_state(state)
}

/// The process is up and serving requests.
async fn liveness_handler() -> Response {
    let msg = serde_json::json!({"status": "ok"});
    (StatusCode::OK, Json(msg)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::http_server::test_support::*;

    #[tokio::test]
    async fn test_status_routes() {
        let router = test_router(test_state().await);

        let response = get(router.clone(), "/_status/livez").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");

        let response = get(router.clone(), "/_status/readyz").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(router, "/_status/version").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await.get("version").is_some());
    }
}
