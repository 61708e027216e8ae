use axum::routing::get;
use axum::Router;

pub mod nonce;
pub mod note;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/nonce/:action", get(nonce::handler))
        .nest("/note", note::router(state.clone()))
        .with_state(state)
}
