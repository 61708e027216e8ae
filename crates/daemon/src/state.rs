use std::time::Duration;
use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::nonce::DEFAULT_LIFETIME;
use crate::notes::PasswordHasherConfig;

pub const APP_NAME: &str = "sealnote";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "db.sqlite";
pub const DEFAULT_API_PORT: u16 = 5010;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the API server
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Public base URL used in share links
    #[serde(default)]
    pub public_url: Option<Url>,
    /// Hex encoded 32 byte secret for anti-forgery nonces
    #[serde(default)]
    pub nonce_secret: Option<String>,
    #[serde(default = "default_nonce_lifetime_secs")]
    pub nonce_lifetime_secs: u64,
    #[serde(default)]
    pub password_hash: PasswordHasherConfig,
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

fn default_nonce_lifetime_secs() -> u64 {
    DEFAULT_LIFETIME.as_secs()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            public_url: None,
            nonce_secret: None,
            nonce_lifetime_secs: default_nonce_lifetime_secs(),
            password_hash: PasswordHasherConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn nonce_lifetime(&self) -> Duration {
        Duration::from_secs(self.nonce_lifetime_secs)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the sealnote directory (~/.sealnote)
    pub sealnote_dir: PathBuf,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the sealnote directory path (custom or default ~/.sealnote)
    pub fn sealnote_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new sealnote state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let sealnote_dir = Self::sealnote_dir(custom_path)?;

        if sealnote_dir.join(CONFIG_FILE_NAME).exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&sealnote_dir)?;

        // Create config (use provided or default), with a persistent nonce secret
        let mut config = config.unwrap_or_default();
        if config.nonce_secret.is_none() {
            config.nonce_secret = Some(hex::encode(rand::random::<[u8; 32]>()));
        }
        let config_path = sealnote_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // Create empty database (just touch the file, it will be migrated by the service)
        let db_path = sealnote_dir.join(DB_FILE_NAME);
        fs::write(&db_path, "")?;

        Ok(Self {
            sealnote_dir,
            db_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the sealnote directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let sealnote_dir = Self::sealnote_dir(custom_path)?;

        if !sealnote_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let db_path = sealnote_dir.join(DB_FILE_NAME);
        let config_path = sealnote_dir.join(CONFIG_FILE_NAME);

        if !db_path.exists() {
            return Err(StateError::MissingFile(DB_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            sealnote_dir,
            db_path,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("sealnote directory not initialized. Run 'sealnote init' first")]
    NotInitialized,

    #[error("sealnote directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
