use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::nonce::{NonceAction, NonceError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonceRequest {
    pub action: NonceAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonceResponse {
    pub action: NonceAction,
    pub nonce: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Path(action): Path<String>,
) -> Result<impl IntoResponse, NonceHandlerError> {
    let action: NonceAction = action.parse()?;
    let nonce = state.nonces().issue(action);
    tracing::debug!(%action, "issued nonce");

    Ok((
        http::StatusCode::OK,
        Json(NonceResponse { action, nonce }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum NonceHandlerError {
    #[error(transparent)]
    Nonce(#[from] NonceError),
}

impl IntoResponse for NonceHandlerError {
    fn into_response(self) -> Response {
        match self {
            NonceHandlerError::Nonce(e) => {
                (http::StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
        }
    }
}

impl ApiRequest for NonceRequest {
    type Response = NonceResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join(&format!("/api/v0/nonce/{}", self.action))?;
        Ok(client.get(full_url))
    }
}
