use clap::Args;

use common::prelude::score_password_strength;

use crate::cli::ui;

/// Score a password the same way `note create` does
#[derive(Args, Debug, Clone)]
pub struct Strength;

#[derive(Debug, thiserror::Error)]
pub enum StrengthError {
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Strength {
    type Error = StrengthError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let password = ui::password("Password to score", false)?;
        let strength = score_password_strength(&password);
        Ok(format!("Password strength: {}", strength))
    }
}
