use clap::Args;
use time::format_description::well_known::Rfc3339;

use sealnote_daemon::workflow::{Workflow, WorkflowError};

use crate::cli::ui;

/// Show the encoded content of a note
#[derive(Args, Debug, Clone)]
pub struct Read {
    /// Note id or share link
    #[arg(value_name = "ID|URL")]
    pub note: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Read {
    type Error = ReadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let password = ui::password("Note password", false)?;
        let note = Workflow::new()
            .reveal(&ctx.client, &self.note, &password)
            .await?;

        let created_at = note
            .created_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| note.created_at.to_string());

        Ok(format!(
            "From:    {}\nCreated: {}\n\nEncoded content:\n  {}\n\n\
             Decode it with the Cipher Map the sender shared with you.",
            note.nickname, created_at, note.encrypted_content,
        ))
    }
}
