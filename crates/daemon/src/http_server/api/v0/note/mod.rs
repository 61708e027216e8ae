use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use http::StatusCode;

pub mod create;
pub mod delete;
pub mod verify;

use crate::nonce::NonceAction;
use crate::notes::NoteError;
use crate::ServiceState;

const SECURITY_CHECK_FAILED: &str = "Security check failed";
const INVALID_PASSWORD: &str = "Invalid password";
const NOTE_NOT_FOUND: &str = "Note not found";
const UNEXPECTED_ERROR: &str = "Unexpected error";
const INVALID_REQUEST: &str = "Invalid request body";

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(create::handler))
        .route("/verify", post(verify::handler))
        .route("/delete", post(delete::handler))
        .with_state(state)
}

/// True if `nonce` was issued for `action` and has not expired.
fn check_nonce(state: &ServiceState, action: NonceAction, nonce: &str) -> bool {
    let ok = state.nonces().verify(action, nonce);
    if !ok {
        tracing::warn!(%action, "rejected request with a bad nonce");
    }
    ok
}

/// Unreadable JSON gets a 400 without the parser's detail.
fn bad_body_response(rejection: JsonRejection) -> Response {
    tracing::debug!("rejected request body: {}", rejection.body_text());
    (StatusCode::BAD_REQUEST, INVALID_REQUEST).into_response()
}

fn bad_nonce_response() -> Response {
    (StatusCode::FORBIDDEN, SECURITY_CHECK_FAILED).into_response()
}

/// Map a note failure to an opaque status and message. Internal detail only goes to the log.
fn note_error_response(err: NoteError) -> Response {
    match err {
        NoteError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        NoteError::Conflict(_) => (
            StatusCode::CONFLICT,
            "A note with this id already exists, please try again",
        )
            .into_response(),
        NoteError::NotFound => (StatusCode::NOT_FOUND, NOTE_NOT_FOUND).into_response(),
        NoteError::InvalidPassword => (StatusCode::UNAUTHORIZED, INVALID_PASSWORD).into_response(),
        NoteError::Password(e) => {
            tracing::error!("password hashing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR).into_response()
        }
        NoteError::Database(e) => {
            tracing::error!("note store failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR).into_response()
        }
    }
}
