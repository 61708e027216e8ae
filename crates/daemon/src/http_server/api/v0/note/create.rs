use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use common::prelude::{validate_charset, Charset};

use super::{bad_body_response, bad_nonce_response, check_nonce, note_error_response};
use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::nonce::NonceAction;
use crate::notes::NoteError;
use crate::ServiceState;

/// `encrypted_content` must already be encoded by the client.
// No Debug: the password must never reach a log line.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    pub nonce: String,
    pub nickname: String,
    pub password: String,
    pub encrypted_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub id: String,
    pub share_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CreateError> {
    let Json(req) = payload?;

    if !check_nonce(&state, NonceAction::CreateNote, &req.nonce) {
        return Err(CreateError::BadNonce);
    }

    if !validate_charset(&req.nickname, Charset::Nickname) {
        tracing::info!("rejected nickname outside the allowed charset");
        return Err(CreateError::InvalidNickname);
    }

    let created = state
        .notes()
        .create(&req.nickname, &req.password, &req.encrypted_content)
        .await?;

    Ok((
        http::StatusCode::CREATED,
        Json(CreateResponse {
            id: created.id,
            share_url: created.share_url,
            created_at: created.created_at,
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("bad request body: {0}")]
    BadBody(#[from] JsonRejection),
    #[error("bad nonce")]
    BadNonce,
    #[error("invalid nickname")]
    InvalidNickname,
    #[error(transparent)]
    Note(#[from] NoteError),
}

impl IntoResponse for CreateError {
    fn into_response(self) -> Response {
        match self {
            CreateError::BadBody(e) => bad_body_response(e),
            CreateError::BadNonce => bad_nonce_response(),
            CreateError::InvalidNickname => (
                http::StatusCode::BAD_REQUEST,
                format!(
                    "Nickname may only contain {}",
                    Charset::Nickname.describe()
                ),
            )
                .into_response(),
            CreateError::Note(e) => note_error_response(e),
        }
    }
}

impl ApiRequest for CreateRequest {
    type Response = CreateResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join("/api/v0/note")?;
        Ok(client.post(full_url).json(&self))
    }
}
