//! Submission checks applied before anything is encoded or sent.
//!
//! - [`Charset`] allow-lists with [`validate_charset`] / [`sanitize`]
//! - [`require_non_empty`] for required fields
//! - [`score_password_strength`] for password feedback

mod charset;
mod strength;

use std::time::Duration;

pub use charset::{sanitize, validate_charset, Charset, Sanitized};
pub use strength::{score_password_strength, PasswordStrength, StrengthLabel};

/// How long a charset warning stays on screen before it is dismissed.
pub const WARNING_DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
}

/// Fail if `value` is empty or only whitespace.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}
