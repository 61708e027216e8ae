use clap::Args;

use sealnote_daemon::workflow::{NoteDraft, PendingAction, Workflow, WorkflowError};

use crate::cli::ui;

/// Encode a note with a fresh Cipher Map and store it behind a password
#[derive(Args, Debug, Clone)]
pub struct Create {
    /// Shown to the recipient and used in the note id
    #[arg(long)]
    pub nickname: String,

    /// Text to encode (prompted for if not given)
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = CreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut workflow = Workflow::new();
        workflow.request(PendingAction::CreateSecureLink);
        let ticket = workflow.proceed(&mut ui::ConfirmGate)?;

        let content = match &self.content {
            Some(content) => content.clone(),
            None => ui::input("Secret content")?,
        };
        let password = ui::password("Note password", true)?;
        ui::print_strength(&password);

        let (draft, warnings) = NoteDraft {
            nickname: self.nickname.clone(),
            password,
            content,
        }
        .sanitize();
        for warning in &warnings {
            ui::flash_warning(&warning.to_string()).await;
        }

        let outcome = workflow
            .create_secure_link(ticket, &ctx.client, &draft)
            .await?;

        Ok(format!(
            "Share link: {}\nNote id:    {}\n\n\
             Cipher Map (shown once, never sent to the server):\n{}\n\
             Encoded content:\n  {}",
            outcome.share_url,
            outcome.id,
            ui::render_cipher_map(&outcome.cipher_map),
            outcome.encoded,
        ))
    }
}
