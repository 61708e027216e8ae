//! Password-gated note lifecycle.
//!
//! A note goes `NonExistent -> Created -> Deleted`. It can be read any number of times
//! while it exists, and there is no update. Reading and deleting both require the
//! password the note was created with; there is no separate read-only tier.
//!
//! The service only ever handles content that was already encoded by the client. It has
//! no access to the Cipher Map and cannot decode anything it stores.

pub mod password;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

use common::prelude::{require_non_empty, ValidationError};

use crate::database::models::{NewNote, Note, NoteStoreError};
use crate::database::Database;

pub use password::{PasswordError, PasswordHasherConfig};

/// Result of a successful create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedNote {
    pub id: String,
    pub share_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Result of a successful password check on read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealedNote {
    pub id: String,
    pub nickname: String,
    /// Still encoded; the server never decodes
    pub encrypted_content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("note '{0}' already exists")]
    Conflict(String),
    #[error("note not found")]
    NotFound,
    #[error("invalid password")]
    InvalidPassword,
    #[error("password error: {0}")]
    Password(#[from] PasswordError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<NoteStoreError> for NoteError {
    fn from(err: NoteStoreError) -> Self {
        match err {
            NoteStoreError::Conflict(id) => NoteError::Conflict(id),
            NoteStoreError::Database(e) => NoteError::Database(e),
        }
    }
}

/// Builds the public link for a note id
pub fn share_url(public_url: &Url, id: &str) -> String {
    format!("{}/note/{}", public_url.as_str().trim_end_matches('/'), id)
}

#[derive(Debug, Clone)]
pub struct NoteService {
    database: Database,
    hasher: PasswordHasherConfig,
    public_url: Url,
}

impl NoteService {
    pub fn new(database: Database, hasher: PasswordHasherConfig, public_url: Url) -> Self {
        Self {
            database,
            hasher,
            public_url,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Base URL share links are built from
    pub fn public_url(&self) -> &Url {
        &self.public_url
    }

    /// Store a new note.
    ///
    /// Only checks that fields are present; charset checks belong to the caller. The id
    /// is `{nickname}-{unix seconds}`, and a second note from the same nickname in the
    /// same second is rejected with `Conflict` rather than overwriting the first.
    pub async fn create(
        &self,
        nickname: &str,
        password: &str,
        encrypted_content: &str,
    ) -> Result<CreatedNote, NoteError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        self.create_at(nickname, password, encrypted_content, now)
            .await
    }

    pub(crate) async fn create_at(
        &self,
        nickname: &str,
        password: &str,
        encrypted_content: &str,
        created_at: i64,
    ) -> Result<CreatedNote, NoteError> {
        require_non_empty("nickname", nickname)?;
        require_non_empty("password", password)?;
        require_non_empty("content", encrypted_content)?;

        let password_hash = password::hash_password(self.hasher, password.to_string()).await?;
        let id = format!("{}-{}", nickname, created_at);

        let note = Note::insert(
            &NewNote {
                id: id.clone(),
                nickname: nickname.to_string(),
                encrypted_content: encrypted_content.to_string(),
                password_hash,
                created_at,
            },
            &self.database,
        )
        .await
        .inspect_err(|e| tracing::warn!(note_id = %id, "note insert failed: {}", e))?;

        tracing::info!(note_id = %note.id, "note created");
        Ok(CreatedNote {
            share_url: share_url(&self.public_url, &note.id),
            created_at: note.created_at(),
            id: note.id,
        })
    }

    /// Return the stored (encoded) content if `password` matches.
    pub async fn verify_and_read(&self, id: &str, password: &str) -> Result<RevealedNote, NoteError> {
        let note = self.authenticate(id, password).await?;
        tracing::info!(note_id = %note.id, "note revealed");
        Ok(RevealedNote {
            created_at: note.created_at(),
            id: note.id,
            nickname: note.nickname,
            encrypted_content: note.encrypted_content,
        })
    }

    /// Permanently delete the note if `password` matches.
    pub async fn verify_and_delete(&self, id: &str, password: &str) -> Result<(), NoteError> {
        let note = self.authenticate(id, password).await?;

        // A concurrent delete may have won between the check and here.
        if !Note::delete(&note.id, &self.database).await? {
            tracing::info!(note_id = %note.id, "note already gone at delete");
            return Err(NoteError::NotFound);
        }

        tracing::info!(note_id = %note.id, "note deleted");
        Ok(())
    }

    async fn authenticate(&self, id: &str, password: &str) -> Result<Note, NoteError> {
        require_non_empty("id", id)?;
        require_non_empty("password", password)?;

        let note = Note::get(id, &self.database)
            .await?
            .ok_or(NoteError::NotFound)?;

        match password::verify_password(password.to_string(), note.password_hash.clone()).await {
            Ok(true) => Ok(note),
            Ok(false) => {
                tracing::info!(note_id = %note.id, "password mismatch");
                Err(NoteError::InvalidPassword)
            }
            Err(PasswordError::MalformedHash) => {
                tracing::error!(note_id = %note.id, "stored password hash is malformed");
                Err(NoteError::InvalidPassword)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::password::tests::cheap_config;
    use super::*;

    use common::prelude::CipherMap;

    async fn service() -> NoteService {
        let db = Database::in_memory().await.unwrap();
        NoteService::new(
            db,
            cheap_config(),
            Url::parse("https://notes.example.com/").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_then_read_returns_content_verbatim() {
        let svc = service().await;
        let content = "xa9q, 2 ~ raw";

        let created = svc.create("john", "Secr3t!9", content).await.unwrap();
        assert!(created.id.starts_with("john-"));
        assert_eq!(
            created.share_url,
            format!("https://notes.example.com/note/{}", created.id)
        );

        let revealed = svc.verify_and_read(&created.id, "Secr3t!9").await.unwrap();
        assert_eq!(revealed.encrypted_content, content);
        assert_eq!(revealed.nickname, "john");
        assert_eq!(revealed.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_id_is_nickname_and_timestamp() {
        let svc = service().await;
        let created = svc.create_at("john", "pw", "c", 1_700_000_000).await.unwrap();
        assert_eq!(created.id, "john-1700000000");
    }

    #[tokio::test]
    async fn test_wrong_password_never_returns_content() {
        let svc = service().await;
        let created = svc.create("john", "Secr3t!9", "abc").await.unwrap();

        for wrong in ["secr3t!9", "Secr3t!", "Secr3t!9 ", "x"] {
            let err = svc.verify_and_read(&created.id, wrong).await.unwrap_err();
            assert!(matches!(err, NoteError::InvalidPassword), "{wrong:?}");
        }

        let err = svc.verify_and_delete(&created.id, "nope").await.unwrap_err();
        assert!(matches!(err, NoteError::InvalidPassword));
        // still there after a failed delete
        assert!(svc.verify_and_read(&created.id, "Secr3t!9").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_is_terminal() {
        let svc = service().await;
        let created = svc.create("john", "pw", "abc").await.unwrap();

        svc.verify_and_delete(&created.id, "pw").await.unwrap();

        let err = svc.verify_and_read(&created.id, "pw").await.unwrap_err();
        assert!(matches!(err, NoteError::NotFound));
        let err = svc.verify_and_delete(&created.id, "pw").await.unwrap_err();
        assert!(matches!(err, NoteError::NotFound));
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let svc = service().await;
        let err = svc.verify_and_read("ghost-1", "pw").await.unwrap_err();
        assert!(matches!(err, NoteError::NotFound));
    }

    #[tokio::test]
    async fn test_same_second_collision_rejected() {
        let svc = service().await;
        svc.create_at("john", "pw", "first", 42).await.unwrap();

        let err = svc.create_at("john", "pw2", "second", 42).await.unwrap_err();
        assert!(matches!(err, NoteError::Conflict(id) if id == "john-42"));

        let revealed = svc.verify_and_read("john-42", "pw").await.unwrap();
        assert_eq!(revealed.encrypted_content, "first");
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let svc = service().await;
        for (nick, pw, content, field) in [
            ("", "pw", "c", "nickname"),
            ("john", "", "c", "password"),
            ("john", "pw", "  ", "content"),
        ] {
            let err = svc.create(nick, pw, content).await.unwrap_err();
            assert!(
                matches!(err, NoteError::Validation(ValidationError::Missing(f)) if f == field)
            );
        }
    }

    #[tokio::test]
    async fn test_server_stores_only_encoded_content_and_hash() {
        let svc = service().await;
        let map = CipherMap::generate();
        let encoded = map.encode("HELLO WORLD");

        let created = svc.create("john", "Secr3t!9", &encoded).await.unwrap();

        let stored = Note::get(&created.id, svc.database()).await.unwrap().unwrap();
        assert!(!stored.encrypted_content.contains("HELLO"));
        assert_eq!(stored.encrypted_content, encoded);
        assert_ne!(stored.password_hash, "Secr3t!9");
        assert!(!stored.password_hash.contains("Secr3t!9"));

        let revealed = svc.verify_and_read(&created.id, "Secr3t!9").await.unwrap();
        assert_eq!(revealed.encrypted_content, encoded);
        assert!(matches!(
            svc.verify_and_read(&created.id, "wrong").await,
            Err(NoteError::InvalidPassword)
        ));
    }

    #[tokio::test]
    async fn test_malformed_stored_hash_is_invalid_password() {
        let svc = service().await;
        Note::insert(
            &NewNote {
                id: "bad-1".to_string(),
                nickname: "bad".to_string(),
                encrypted_content: "zz".to_string(),
                password_hash: "garbage".to_string(),
                created_at: 1,
            },
            svc.database(),
        )
        .await
        .unwrap();

        let err = svc.verify_and_read("bad-1", "anything").await.unwrap_err();
        assert!(matches!(err, NoteError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_concurrent_deletes_one_wins() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("db.sqlite")).await.unwrap();
        let svc = NoteService::new(
            db,
            cheap_config(),
            Url::parse("https://notes.example.com/").unwrap(),
        );
        let created = svc.create("john", "pw", "abc").await.unwrap();

        let (a, b) = tokio::join!(
            svc.verify_and_delete(&created.id, "pw"),
            svc.verify_and_delete(&created.id, "pw"),
        );

        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(NoteError::NotFound))));
        assert!(matches!(
            svc.verify_and_read(&created.id, "pw").await,
            Err(NoteError::NotFound)
        ));
    }
}
