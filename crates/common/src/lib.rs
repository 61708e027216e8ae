/**
 * Substitution cipher used to encode note content
 *  before it ever leaves the client.
 * Generates a fresh, random Cipher Map per note
 *  and encodes text against it. There is no decoder.
 */
pub mod cipher;
/**
 * Client-side submission checks: charset allow-lists
 *  for nicknames and content, non-empty fields and
 *  password strength feedback.
 */
pub mod validation;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::cipher::{encode, CipherMap, CipherMapError};
    pub use crate::validation::{
        require_non_empty, sanitize, score_password_strength, validate_charset, Charset,
        PasswordStrength, Sanitized, ValidationError,
    };
    pub use crate::version::{build_info, BuildInfo};
}
