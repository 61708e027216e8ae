use std::sync::Arc;

use url::Url;

use crate::database::{Database, DatabaseSetupError};
use crate::nonce::{NonceError, Nonces};
use crate::notes::{NoteService, PasswordError};
use crate::ServiceConfig;

/// Main service state, shared by every request handler
#[derive(Clone)]
pub struct State {
    database: Database,
    notes: NoteService,
    nonces: Arc<Nonces>,
}

impl State {
    pub async fn from_config(config: &ServiceConfig) -> Result<Self, StateSetupError> {
        // 1. Setup database
        let database = match config.sqlite_path {
            Some(ref path) => {
                // check that the path exists
                if !path.exists() {
                    return Err(StateSetupError::DatabasePathDoesNotExist);
                }
                tracing::info!(path = %path.display(), "opening note store");
                Database::open(path).await?
            }
            // otherwise just set up an in-memory database
            None => {
                tracing::info!("using an in-memory note store");
                Database::in_memory().await?
            }
        };

        // 2. Check hashing cost up front rather than on the first create
        config.password_hash.validate()?;

        // 3. Setup nonce secret
        let nonces = match config.nonce_secret {
            Some(ref secret) => Nonces::from_hex(secret, config.nonce_lifetime)?,
            None => {
                tracing::warn!("no nonce secret configured, generating an ephemeral one");
                Nonces::generate(config.nonce_lifetime)?
            }
        };

        let public_url = config.resolved_public_url();
        tracing::info!(public_url = %public_url, "share links will use this base");

        Ok(Self::new(database, config.password_hash, public_url, nonces))
    }

    pub fn new(
        database: Database,
        password_hash: crate::notes::PasswordHasherConfig,
        public_url: Url,
        nonces: Nonces,
    ) -> Self {
        let notes = NoteService::new(database.clone(), password_hash, public_url);
        Self {
            database,
            notes,
            nonces: Arc::new(nonces),
        }
    }

    pub fn notes(&self) -> &NoteService {
        &self.notes
    }

    pub fn nonces(&self) -> &Nonces {
        &self.nonces
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl AsRef<Database> for State {
    fn as_ref(&self) -> &Database {
        self.database()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("Database path does not exist")]
    DatabasePathDoesNotExist,
    #[error("Database setup error: {0}")]
    DatabaseSetupError(#[from] DatabaseSetupError),
    #[error("Invalid password hash configuration: {0}")]
    PasswordHash(#[from] PasswordError),
    #[error("Invalid nonce configuration: {0}")]
    Nonce(#[from] NonceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_default_config() {
        let state = State::from_config(&ServiceConfig::default()).await.unwrap();
        state.database().ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_database_path() {
        let config = ServiceConfig {
            sqlite_path: Some("/definitely/not/here/db.sqlite".into()),
            ..Default::default()
        };
        assert!(matches!(
            State::from_config(&config).await,
            Err(StateSetupError::DatabasePathDoesNotExist)
        ));
    }

    #[tokio::test]
    async fn test_config_dir_with_space() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("sealnote data");
        std::fs::create_dir(&store_dir).unwrap();
        let path = store_dir.join("db.sqlite");
        std::fs::write(&path, "").unwrap();

        let config = ServiceConfig {
            sqlite_path: Some(path),
            ..Default::default()
        };
        let state = State::from_config(&config).await.unwrap();
        state.database().ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_nonce_secret() {
        let config = ServiceConfig {
            nonce_secret: Some("not hex".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            State::from_config(&config).await,
            Err(StateSetupError::Nonce(NonceError::InvalidSecret))
        ));
    }
}
