use axum::Router;
use http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use url::Url;

pub mod client;
pub mod v0;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    let router = Router::new()
        .nest("/v0", v0::router(state.clone()))
        .with_state(state.clone());

    match cors_layer(state.notes().public_url()) {
        Some(cors_layer) => router.layer(cors_layer),
        None => router,
    }
}

/// Browsers may only call the API from the origin share links point at.
/// Any other origin gets no CORS headers and so cannot read a nonce.
fn cors_layer(public_url: &Url) -> Option<CorsLayer> {
    let origin = public_url.origin();
    if !origin.is_tuple() {
        tracing::warn!(%public_url, "public url has no origin, cross-origin requests disabled");
        return None;
    }

    let origin = HeaderValue::from_str(&origin.ascii_serialization()).ok()?;
    Some(
        CorsLayer::new()
            .allow_methods(vec![Method::GET, Method::POST])
            .allow_headers(vec![ACCEPT, CONTENT_TYPE, ORIGIN])
            .allow_origin(origin)
            .allow_credentials(false),
    )
}
