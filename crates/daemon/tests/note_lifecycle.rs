//! End to end note flow: the client workflow talking to a live service.

mod support;

use std::io;

use http::StatusCode;

use sealnote_daemon::http_server::api::client::{ApiClient, ApiError};
use sealnote_daemon::http_server::api::v0::note::verify::VerifyRequest;
use sealnote_daemon::nonce::NonceAction;
use sealnote_daemon::workflow::{
    NoteDraft, PendingAction, PrecautionsGate, Workflow, WorkflowError,
};

use support::TestServer;

struct AlwaysAgree;

impl PrecautionsGate for AlwaysAgree {
    fn acknowledge(&mut self, _notice: &str) -> io::Result<bool> {
        Ok(true)
    }
}

fn draft(content: &str) -> NoteDraft {
    NoteDraft {
        nickname: "john".to_string(),
        password: "Secr3t!9".to_string(),
        content: content.to_string(),
    }
}

fn api_status(err: &WorkflowError) -> Option<StatusCode> {
    match err {
        WorkflowError::Api(e) => e.status(),
        _ => None,
    }
}

#[tokio::test]
async fn test_create_reveal_destroy() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.url).unwrap();
    let mut workflow = Workflow::new();

    workflow.request(PendingAction::CreateSecureLink);
    let ticket = workflow.proceed(&mut AlwaysAgree).unwrap();
    let created = workflow
        .create_secure_link(ticket, &client, &draft("HELLO WORLD"))
        .await
        .unwrap();

    assert!(created.id.starts_with("john-"));
    assert!(created.share_url.ends_with(&format!("/note/{}", created.id)));
    assert_eq!(created.encoded, created.cipher_map.encode("HELLO WORLD"));
    assert!(!created.encoded.contains("HELLO"));
    assert_eq!(workflow.current_cipher_map(), Some(&created.cipher_map));

    // the server only ever saw the encoded text
    let stored = server
        .state
        .notes()
        .verify_and_read(&created.id, "Secr3t!9")
        .await
        .unwrap();
    assert_eq!(stored.encrypted_content, created.encoded);

    // the share link works as a note reference
    let revealed = workflow
        .reveal(&client, &created.share_url, "Secr3t!9")
        .await
        .unwrap();
    assert_eq!(revealed.encrypted_content, created.encoded);
    assert_eq!(revealed.nickname, "john");

    let err = workflow
        .reveal(&client, &created.id, "secr3t!9")
        .await
        .unwrap_err();
    assert_eq!(api_status(&err), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "Invalid password");

    let deleted = workflow
        .destroy(&client, &created.id, "Secr3t!9")
        .await
        .unwrap();
    assert!(deleted.deleted);

    let err = workflow
        .reveal(&client, &created.id, "Secr3t!9")
        .await
        .unwrap_err();
    assert_eq!(api_status(&err), Some(StatusCode::NOT_FOUND));

    server.stop().await;
}

#[tokio::test]
async fn test_sanitized_input_is_what_gets_stored() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.url).unwrap();
    let mut workflow = Workflow::new();

    workflow.request(PendingAction::CreateSecureLink);
    let ticket = workflow.proceed(&mut AlwaysAgree).unwrap();
    let note = NoteDraft {
        nickname: "jo hn!".to_string(),
        password: "pw".to_string(),
        content: "meet at 5 <b>".to_string(),
    };
    let created = workflow
        .create_secure_link(ticket, &client, &note)
        .await
        .unwrap();

    assert!(created.id.starts_with("john-"));
    assert_eq!(created.warnings.len(), 2);
    assert_eq!(created.encoded, created.cipher_map.encode("meet at 5 b"));

    server.stop().await;
}

#[tokio::test]
async fn test_nonce_is_bound_to_action() {
    let server = TestServer::start().await;
    let client = ApiClient::new(&server.url).unwrap();

    let created = server
        .state
        .notes()
        .create("john", "pw", "xa9q")
        .await
        .unwrap();

    // a create nonce cannot be spent on a verify
    let nonce = client.nonce(NonceAction::CreateNote).await.unwrap();
    let err = client
        .call(VerifyRequest {
            nonce,
            id: created.id.clone(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        &err,
        ApiError::HttpStatus(StatusCode::FORBIDDEN, msg) if msg == "Security check failed"
    ));

    let nonce = client.nonce(NonceAction::VerifyNote).await.unwrap();
    let revealed = client
        .call(VerifyRequest {
            nonce,
            id: created.id,
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(revealed.encrypted_content, "xa9q");

    server.stop().await;
}

#[tokio::test]
async fn test_status_endpoints() {
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    for path in ["/_status/livez", "/_status/readyz", "/_status/version"] {
        let response = client
            .get(server.url.join(path).unwrap())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }

    let response = client
        .get(server.url.join("/nope").unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    let server = TestServer::start().await;
    let url = server.url.clone();
    server.stop().await;

    let client = ApiClient::new(&url).unwrap();
    let err = Workflow::new()
        .reveal(&client, "john-1", "pw")
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Api(ApiError::Reqwest(_))));
    assert_eq!(
        err.to_string(),
        "could not reach the note service, please try again"
    );
}
