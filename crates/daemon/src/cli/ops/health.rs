use std::convert::Infallible;

use clap::Args;

use sealnote_daemon::state::AppState;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = Infallible;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut lines = Vec::new();

        // 1. Check config directory
        lines.push("Config:".to_string());
        match AppState::load(ctx.config_path.clone()) {
            Ok(state) => {
                lines.push(format!("  directory:   {}", state.sealnote_dir.display()));
                lines.push("  config.toml: OK".to_string());
                lines.push("  db.sqlite:   OK".to_string());
                lines.push(format!("  api_port:    {}", state.config.api_port));
                match state.config.public_url {
                    Some(url) => lines.push(format!("  public_url:  {}", url)),
                    None => lines.push("  public_url:  (localhost)".to_string()),
                }
                if state.config.nonce_secret.is_none() {
                    lines.push("  nonce_secret: not set, nonces reset on restart".to_string());
                }
            }
            Err(e) => {
                lines.push(format!("  error: {}", e));
            }
        }

        // 2. Probe the service
        let base = ctx.client.base_url();
        lines.push(String::new());
        lines.push(format!("Service ({}):", base));

        for probe in ["livez", "readyz"] {
            lines.push(format!("  {:<7} {}", format!("{}:", probe), check(ctx, probe).await));
        }

        Ok(lines.join("\n"))
    }
}

async fn check(ctx: &crate::cli::op::OpContext, probe: &str) -> String {
    let Ok(url) = ctx.client.base_url().join(&format!("/_status/{}", probe)) else {
        return "INVALID URL".to_string();
    };

    match ctx.client.http_client().get(url).send().await {
        Ok(resp) if resp.status().is_success() => "OK".to_string(),
        Ok(resp) => format!("UNHEALTHY ({})", resp.status()),
        Err(_) => "NOT REACHABLE".to_string(),
    }
}
