use clap::Args;
use url::Url;

use sealnote_daemon::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Port for the note API (default 5010)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Public base URL share links are built from (e.g. https://notes.example.com)
    #[arg(long)]
    pub public_url: Option<Url>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut config = AppConfig::default();
        if let Some(port) = self.api_port {
            config.api_port = port;
        }
        config.public_url = self.public_url.clone();

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        Ok(format!(
            "Initialized sealnote directory at {}\n  config: {}\n  database: {}\n  api_port: {}",
            state.sealnote_dir.display(),
            state.config_path.display(),
            state.db_path.display(),
            state.config.api_port,
        ))
    }
}
