use sqlx::FromRow;
use time::OffsetDateTime;

use crate::database::Database;

/// A stored note. Content and hash are written once at insert and never updated.
#[derive(Debug, Clone, FromRow)]
pub struct Note {
    pub id: String,
    pub nickname: String,
    pub encrypted_content: String,
    pub password_hash: String,
    /// Unix seconds
    pub created_at: i64,
}

/// Everything needed to insert a note
#[derive(Debug, Clone)]
pub struct NewNote {
    pub id: String,
    pub nickname: String,
    pub encrypted_content: String,
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteStoreError {
    #[error("a note with id '{0}' already exists")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Note {
    pub fn created_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.created_at).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    /// Insert a new note. Fails with `Conflict` if the id is taken.
    pub async fn insert(new: &NewNote, db: &Database) -> Result<Note, NoteStoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO notes (id, nickname, encrypted_content, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&new.id)
        .bind(&new.nickname)
        .bind(&new.encrypted_content)
        .bind(&new.password_hash)
        .bind(new.created_at)
        .execute(&**db)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(NoteStoreError::Conflict(new.id.clone()));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Note {
            id: new.id.clone(),
            nickname: new.nickname.clone(),
            encrypted_content: new.encrypted_content.clone(),
            password_hash: new.password_hash.clone(),
            created_at: new.created_at,
        })
    }

    /// Get a note by id
    pub async fn get(id: &str, db: &Database) -> Result<Option<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, nickname, encrypted_content, password_hash, created_at
            FROM notes
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&**db)
        .await
    }

    /// Permanently remove a note. Returns false if nothing was deleted.
    pub async fn delete(id: &str, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?1")
            .bind(id)
            .execute(&**db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(id: &str) -> NewNote {
        NewNote {
            id: id.to_string(),
            nickname: "john".to_string(),
            encrypted_content: "xa9q, 2".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            created_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_insert_get_delete() {
        let db = Database::in_memory().await.unwrap();

        let note = Note::insert(&new_note("john-1700000000"), &db).await.unwrap();
        assert_eq!(note.id, "john-1700000000");

        let fetched = Note::get("john-1700000000", &db).await.unwrap().unwrap();
        assert_eq!(fetched.encrypted_content, "xa9q, 2");
        assert_eq!(fetched.nickname, "john");
        assert_eq!(fetched.created_at().unix_timestamp(), 1_700_000_000);

        assert!(Note::delete("john-1700000000", &db).await.unwrap());
        assert!(Note::get("john-1700000000", &db).await.unwrap().is_none());
        assert!(!Note::delete("john-1700000000", &db).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let db = Database::in_memory().await.unwrap();
        Note::insert(&new_note("john-1"), &db).await.unwrap();

        let err = Note::insert(&new_note("john-1"), &db).await.unwrap_err();
        assert!(matches!(err, NoteStoreError::Conflict(id) if id == "john-1"));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = Database::in_memory().await.unwrap();
        assert!(Note::get("nobody-0", &db).await.unwrap().is_none());
    }
}
