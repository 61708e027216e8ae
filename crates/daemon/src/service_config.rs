use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::notes::PasswordHasherConfig;

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// Port for the API HTTP server.
    pub api_port: u16,
    /// Public base URL share links are built from
    ///  (e.g. "https://notes.example.com").
    ///  Defaults to http://localhost:{api_port}
    pub public_url: Option<Url>,

    // data store configuration
    /// a path to a sqlite database, if not set then an
    ///  in-memory database will be used
    pub sqlite_path: Option<PathBuf>,

    // security
    /// Argon2 cost for note password hashes
    pub password_hash: PasswordHasherConfig,
    /// Hex nonce secret. If not set a random one is generated
    ///  and outstanding nonces are invalidated on restart
    pub nonce_secret: Option<String>,
    pub nonce_lifetime: Duration,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// The URL share links point at
    pub fn resolved_public_url(&self) -> Url {
        self.public_url.clone().unwrap_or_else(|| {
            Url::parse(&format!("http://localhost:{}", self.api_port))
                .expect("localhost url must parse")
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: crate::state::DEFAULT_API_PORT,
            public_url: None,
            sqlite_path: None,
            password_hash: PasswordHasherConfig::default(),
            nonce_secret: None,
            nonce_lifetime: crate::nonce::DEFAULT_LIFETIME,
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
