use clap::Args;
use url::Url;

use sealnote_daemon::state::{AppState, StateError};
use sealnote_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override API server port (default from config)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Public base URL for share links (default from config, then http://localhost:{port})
    #[arg(long)]
    pub public_url: Option<Url>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Load state from config path (or default ~/.sealnote)
        let state = AppState::load(ctx.config_path.clone())?;

        let config = ServiceConfig {
            api_port: self.api_port.unwrap_or(state.config.api_port),
            public_url: self
                .public_url
                .clone()
                .or_else(|| state.config.public_url.clone()),
            sqlite_path: Some(state.db_path.clone()),
            password_hash: state.config.password_hash,
            nonce_secret: state.config.nonce_secret.clone(),
            nonce_lifetime: state.config.nonce_lifetime(),
            log_level: tracing::Level::INFO,
            log_dir: self.log_dir.clone(),
        };

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
