use clap::{Args, Subcommand};

pub mod cipher;
pub mod create;
pub mod delete;
pub mod read;

use crate::cli::op::Op;

crate::command_enum! {
    (Create, create::Create),
    (Cipher, cipher::Cipher),
    (Read, read::Read),
    (Delete, delete::Delete),
}

pub type NoteCommand = Command;

/// Create, read and delete notes
#[derive(Args, Debug, Clone)]
pub struct Note {
    #[command(subcommand)]
    pub command: NoteCommand,
}

#[async_trait::async_trait]
impl Op for Note {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
