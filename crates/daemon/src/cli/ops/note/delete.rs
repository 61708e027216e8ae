use clap::Args;

use sealnote_daemon::workflow::{parse_note_ref, Workflow, WorkflowError};

use crate::cli::ui;

/// Permanently delete a note
#[derive(Args, Debug, Clone)]
pub struct Delete {
    /// Note id or share link
    #[arg(value_name = "ID|URL")]
    pub note: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Delete {
    type Error = DeleteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let id = parse_note_ref(&self.note)?;
        let password = ui::password("Note password", false)?;

        if !ui::confirm(&format!("Permanently delete note {}? This cannot be undone", id))? {
            return Ok("Deletion cancelled".to_string());
        }

        let deleted = Workflow::new().destroy(&ctx.client, &id, &password).await?;
        Ok(format!("Note {} deleted", deleted.id))
    }
}
