use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::{bad_body_response, bad_nonce_response, check_nonce, note_error_response};
use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::nonce::NonceAction;
use crate::notes::NoteError;
use crate::ServiceState;

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteRequest {
    pub nonce: String,
    pub id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DeleteError> {
    let Json(req) = payload?;

    if !check_nonce(&state, NonceAction::DeleteNote, &req.nonce) {
        return Err(DeleteError::BadNonce);
    }

    state.notes().verify_and_delete(&req.id, &req.password).await?;

    Ok((
        http::StatusCode::OK,
        Json(DeleteResponse {
            id: req.id,
            deleted: true,
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("bad request body: {0}")]
    BadBody(#[from] JsonRejection),
    #[error("bad nonce")]
    BadNonce,
    #[error(transparent)]
    Note(#[from] NoteError),
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        match self {
            DeleteError::BadBody(e) => bad_body_response(e),
            DeleteError::BadNonce => bad_nonce_response(),
            DeleteError::Note(e) => note_error_response(e),
        }
    }
}

impl ApiRequest for DeleteRequest {
    type Response = DeleteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join("/api/v0/note/delete")?;
        Ok(client.post(full_url).json(&self))
    }
}
