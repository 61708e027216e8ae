use clap::Args;

use sealnote_daemon::workflow::{PendingAction, Workflow, WorkflowError};

use crate::cli::ui;

/// Generate a Cipher Map locally without storing anything
#[derive(Args, Debug, Clone)]
pub struct Cipher {
    /// Optional text to encode with the new map
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Cipher {
    type Error = CipherError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut workflow = Workflow::new();
        workflow.request(PendingAction::CreateCipherOnly);
        let ticket = workflow.proceed(&mut ui::ConfirmGate)?;

        let outcome = workflow.create_cipher_only(ticket, self.content.as_deref())?;
        for warning in &outcome.warnings {
            ui::flash_warning(&warning.to_string()).await;
        }

        let mut output = format!(
            "Cipher Map:\n{}",
            ui::render_cipher_map(&outcome.cipher_map)
        );
        if let Some(encoded) = outcome.encoded {
            output.push_str(&format!("\nEncoded content:\n  {}", encoded));
        }
        Ok(output)
    }
}
