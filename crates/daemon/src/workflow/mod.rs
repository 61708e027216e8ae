//! Client-side session flow for creating and opening notes.
//!
//! A [`Workflow`] owns the state of one user session: the Cipher Map from the last
//! creation and the action waiting on the precautions gate. Creation always goes
//! `request -> proceed -> create_*`. `proceed` hands back a [`Proceed`] ticket that
//! the create calls consume, so no content is encoded before the user has acknowledged
//! [`PRECAUTIONS_NOTICE`].
//!
//! Content is encoded here, before any network call. The map never leaves this struct
//! except through the returned outcome, which the caller shows to the user.

mod note_ref;

use std::fmt;
use std::io;

use common::prelude::{require_non_empty, sanitize, CipherMap, Charset, ValidationError};

use crate::http_server::api::client::{ApiClient, ApiError};
use crate::http_server::api::v0::note::create::CreateRequest;
use crate::http_server::api::v0::note::delete::{DeleteRequest, DeleteResponse};
use crate::http_server::api::v0::note::verify::{VerifyRequest, VerifyResponse};
use crate::nonce::NonceAction;

pub use note_ref::parse_note_ref;

pub const PRECAUTIONS_NOTICE: &str = "\
Before you continue:
  * The Cipher Map is shown once and is never sent to the server. Without it the note cannot be decoded.
  * Share the map and the password over a different channel than the link.
  * Anyone with the password can read the note, and can delete it for good.
  * The substitution cipher hides text from casual reading only. Do not use it for real secrets.";

/// Creation actions that must pass the precautions gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    CreateSecureLink,
    CreateCipherOnly,
}

/// Asks the user to acknowledge the precautions notice.
pub trait PrecautionsGate {
    /// `Ok(true)` only on an explicit acknowledgement.
    fn acknowledge(&mut self, notice: &str) -> io::Result<bool>;
}

/// Proof that the gate was passed for one action. Only [`Workflow::proceed`] creates it.
#[derive(Debug)]
pub struct Proceed {
    action: PendingAction,
}

impl Proceed {
    pub fn action(&self) -> PendingAction {
        self.action
    }
}

/// What the user typed into the create form
#[derive(Clone, Default)]
pub struct NoteDraft {
    pub nickname: String,
    pub password: String,
    pub content: String,
}

impl NoteDraft {
    /// Strip disallowed characters from nickname and content. The password is left as typed.
    ///
    /// Callers can show the returned warnings before anything is sent.
    pub fn sanitize(&self) -> (NoteDraft, Vec<CharsetWarning>) {
        let mut warnings = Vec::new();
        let draft = NoteDraft {
            nickname: sanitize_field(&self.nickname, Charset::Nickname, &mut warnings),
            password: self.password.clone(),
            content: sanitize_field(&self.content, Charset::Content, &mut warnings),
        };
        (draft, warnings)
    }
}

/// Characters that were dropped from a field before submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetWarning {
    pub field: Charset,
    pub removed: Vec<char>,
}

impl fmt::Display for CharsetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let removed: String = self.removed.iter().collect();
        write!(
            f,
            "Removed characters not allowed in {} ({:?}). Only {} are allowed.",
            self.field,
            removed,
            self.field.describe()
        )
    }
}

#[derive(Debug, Clone)]
pub struct SecureLinkOutcome {
    pub id: String,
    pub share_url: String,
    pub cipher_map: CipherMap,
    /// Content as it was sent to the server
    pub encoded: String,
    pub warnings: Vec<CharsetWarning>,
}

#[derive(Debug, Clone)]
pub struct CipherOnlyOutcome {
    pub cipher_map: CipherMap,
    pub encoded: Option<String>,
    pub warnings: Vec<CharsetWarning>,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("no action is waiting for confirmation")]
    NothingPending,
    #[error("precautions were not acknowledged")]
    PrecautionsDeclined,
    #[error("confirmation was for {0:?}, not {1:?}")]
    WrongAction(PendingAction, PendingAction),
    #[error("could not ask for confirmation: {0}")]
    Gate(#[source] io::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("'{0}' is not a note id or share link")]
    InvalidNoteRef(String),
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
}

#[derive(Debug, Default)]
pub struct Workflow {
    current_cipher_map: Option<CipherMap>,
    pending_action: Option<PendingAction>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_cipher_map(&self) -> Option<&CipherMap> {
        self.current_cipher_map.as_ref()
    }

    pub fn pending_action(&self) -> Option<PendingAction> {
        self.pending_action
    }

    /// Record `action` as waiting on the gate, replacing anything already pending.
    pub fn request(&mut self, action: PendingAction) {
        tracing::debug!(?action, "action requested");
        self.pending_action = Some(action);
    }

    pub fn cancel(&mut self) {
        self.pending_action = None;
    }

    /// Run the gate for the pending action. The action is cleared either way.
    pub fn proceed<G: PrecautionsGate + ?Sized>(
        &mut self,
        gate: &mut G,
    ) -> Result<Proceed, WorkflowError> {
        let action = self
            .pending_action
            .take()
            .ok_or(WorkflowError::NothingPending)?;

        if !gate
            .acknowledge(PRECAUTIONS_NOTICE)
            .map_err(WorkflowError::Gate)?
        {
            tracing::debug!(?action, "precautions declined");
            return Err(WorkflowError::PrecautionsDeclined);
        }
        Ok(Proceed { action })
    }

    /// Encode the draft locally, then store it on the service.
    ///
    /// The draft is sanitized again here, so a draft already passed through
    /// [`NoteDraft::sanitize`] yields no warnings.
    ///
    /// The new map is kept as the session map only when the service accepted the note.
    pub async fn create_secure_link(
        &mut self,
        ticket: Proceed,
        client: &ApiClient,
        draft: &NoteDraft,
    ) -> Result<SecureLinkOutcome, WorkflowError> {
        expect_action(&ticket, PendingAction::CreateSecureLink)?;
        self.current_cipher_map = None;

        let (draft, warnings) = draft.sanitize();
        require_non_empty("nickname", &draft.nickname)?;
        require_non_empty("password", &draft.password)?;
        require_non_empty("content", &draft.content)?;

        let cipher_map = CipherMap::generate();
        let encoded = cipher_map.encode(&draft.content);

        let nonce = client.nonce(NonceAction::CreateNote).await?;
        let created = client
            .call(CreateRequest {
                nonce,
                nickname: draft.nickname,
                password: draft.password,
                encrypted_content: encoded.clone(),
            })
            .await?;

        tracing::info!(note_id = %created.id, "secure link created");
        self.current_cipher_map = Some(cipher_map.clone());
        Ok(SecureLinkOutcome {
            id: created.id,
            share_url: created.share_url,
            cipher_map,
            encoded,
            warnings,
        })
    }

    /// Generate a map without contacting the service, optionally encoding `content` with it.
    pub fn create_cipher_only(
        &mut self,
        ticket: Proceed,
        content: Option<&str>,
    ) -> Result<CipherOnlyOutcome, WorkflowError> {
        expect_action(&ticket, PendingAction::CreateCipherOnly)?;

        let mut warnings = Vec::new();
        let cipher_map = CipherMap::generate();
        let encoded = content
            .map(|text| sanitize_field(text, Charset::Content, &mut warnings))
            .map(|text| cipher_map.encode(&text));

        self.current_cipher_map = Some(cipher_map.clone());
        Ok(CipherOnlyOutcome {
            cipher_map,
            encoded,
            warnings,
        })
    }

    /// Fetch the still-encoded content of a note. `note_ref` is an id or a share link.
    pub async fn reveal(
        &self,
        client: &ApiClient,
        note_ref: &str,
        password: &str,
    ) -> Result<VerifyResponse, WorkflowError> {
        let id = parse_note_ref(note_ref)?;
        require_non_empty("password", password)?;

        let nonce = client.nonce(NonceAction::VerifyNote).await?;
        Ok(client
            .call(VerifyRequest {
                nonce,
                id,
                password: password.to_string(),
            })
            .await?)
    }

    /// Permanently delete a note.
    pub async fn destroy(
        &self,
        client: &ApiClient,
        note_ref: &str,
        password: &str,
    ) -> Result<DeleteResponse, WorkflowError> {
        let id = parse_note_ref(note_ref)?;
        require_non_empty("password", password)?;

        let nonce = client.nonce(NonceAction::DeleteNote).await?;
        Ok(client
            .call(DeleteRequest {
                nonce,
                id,
                password: password.to_string(),
            })
            .await?)
    }
}

fn expect_action(ticket: &Proceed, expected: PendingAction) -> Result<(), WorkflowError> {
    if ticket.action != expected {
        return Err(WorkflowError::WrongAction(ticket.action, expected));
    }
    Ok(())
}

fn sanitize_field(text: &str, field: Charset, warnings: &mut Vec<CharsetWarning>) -> String {
    let sanitized = sanitize(text, field);
    if sanitized.changed() {
        tracing::warn!(%field, removed = sanitized.removed.len(), "disallowed characters removed");
        warnings.push(CharsetWarning {
            field,
            removed: sanitized.removed,
        });
    }
    sanitized.text
}
