use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{bad_body_response, bad_nonce_response, check_nonce, note_error_response};
use crate::http_server::api::client::{ApiError, ApiRequest};
use crate::nonce::NonceAction;
use crate::notes::NoteError;
use crate::ServiceState;

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyRequest {
    pub nonce: String,
    pub id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub id: String,
    pub nickname: String,
    pub encrypted_content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, VerifyError> {
    let Json(req) = payload?;

    if !check_nonce(&state, NonceAction::VerifyNote, &req.nonce) {
        return Err(VerifyError::BadNonce);
    }

    let note = state.notes().verify_and_read(&req.id, &req.password).await?;

    Ok((
        http::StatusCode::OK,
        Json(VerifyResponse {
            id: note.id,
            nickname: note.nickname,
            encrypted_content: note.encrypted_content,
            created_at: note.created_at,
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("bad request body: {0}")]
    BadBody(#[from] JsonRejection),
    #[error("bad nonce")]
    BadNonce,
    #[error(transparent)]
    Note(#[from] NoteError),
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        match self {
            VerifyError::BadBody(e) => bad_body_response(e),
            VerifyError::BadNonce => bad_nonce_response(),
            VerifyError::Note(e) => note_error_response(e),
        }
    }
}

impl ApiRequest for VerifyRequest {
    type Response = VerifyResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = base_url.join("/api/v0/note/verify")?;
        Ok(client.post(full_url).json(&self))
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::json;

    use crate::http_server::test_support::*;
    use crate::nonce::NonceAction;

    #[tokio::test]
    async fn test_verify_returns_encoded_content() {
        let state = test_state().await;
        let created = state.notes().create("john", "Secr3t!9", "xa9q, 2").await.unwrap();

        let body = json!({
            "nonce": nonce(&state, NonceAction::VerifyNote),
            "id": created.id,
            "password": "Secr3t!9",
        });
        let response = post_json(test_router(state), "/api/v0/note/verify", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["encrypted_content"], "xa9q, 2");
        assert_eq!(body["nickname"], "john");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let state = test_state().await;
        let created = state.notes().create("john", "Secr3t!9", "xa9q").await.unwrap();

        let body = json!({
            "nonce": nonce(&state, NonceAction::VerifyNote),
            "id": created.id,
            "password": "guess",
        });
        let response = post_json(test_router(state), "/api/v0/note/verify", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let text = body_string(response).await;
        assert_eq!(text, "Invalid password");
        assert!(!text.contains("xa9q"));
    }

    #[tokio::test]
    async fn test_unknown_note() {
        let state = test_state().await;
        let body = json!({
            "nonce": nonce(&state, NonceAction::VerifyNote),
            "id": "ghost-1",
            "password": "pw",
        });
        let response = post_json(test_router(state), "/api/v0/note/verify", body).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "Note not found");
    }

    #[tokio::test]
    async fn test_bad_nonce_checked_before_password() {
        let state = test_state().await;
        let created = state.notes().create("john", "pw", "xa").await.unwrap();

        let body = json!({
            "nonce": "00112233445566778899",
            "id": created.id,
            "password": "pw",
        });
        let response = post_json(test_router(state), "/api/v0/note/verify", body).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_password_field_is_bad_request() {
        let state = test_state().await;
        let created = state.notes().create("john", "pw", "xa").await.unwrap();

        let body = json!({
            "nonce": nonce(&state, NonceAction::VerifyNote),
            "id": created.id,
        });
        let response = post_json(test_router(state), "/api/v0/note/verify", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "password is required");
    }

    #[tokio::test]
    async fn test_malformed_body_hides_parser_detail() {
        let state = test_state().await;
        for raw in [r#"{"id": 7}"#, "not json"] {
            let response = post_raw(test_router(state.clone()), "/api/v0/note/verify", raw).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{raw}");
            assert_eq!(body_string(response).await, "Invalid request body");
        }
    }
}
