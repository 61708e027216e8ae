//! Action-bound anti-forgery tokens.
//!
//! A nonce is a truncated HMAC-SHA256 over `"{tick}|{action}"`, where the tick advances
//! every half lifetime. A nonce is therefore valid for between half and one full
//! lifetime, needs no server-side storage, and cannot be replayed against a different
//! action.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::OffsetDateTime;

type HmacSha256 = Hmac<Sha256>;

pub const SECRET_SIZE: usize = 32;
/// Bytes of the HMAC kept in a nonce
const NONCE_BYTES: usize = 10;
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// The operations a nonce can be issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonceAction {
    CreateNote,
    VerifyNote,
    DeleteNote,
}

impl NonceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NonceAction::CreateNote => "create_note",
            NonceAction::VerifyNote => "verify_note",
            NonceAction::DeleteNote => "delete_note",
        }
    }
}

impl fmt::Display for NonceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NonceAction {
    type Err = NonceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_note" => Ok(NonceAction::CreateNote),
            "verify_note" => Ok(NonceAction::VerifyNote),
            "delete_note" => Ok(NonceAction::DeleteNote),
            other => Err(NonceError::UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NonceError {
    #[error("unknown nonce action: {0}")]
    UnknownAction(String),
    #[error("nonce secret must be {SECRET_SIZE} bytes of hex")]
    InvalidSecret,
    #[error("nonce lifetime must be at least 2 seconds")]
    InvalidLifetime,
}

/// Issues and checks nonces with a process-wide secret
#[derive(Clone)]
pub struct Nonces {
    secret: [u8; SECRET_SIZE],
    lifetime_secs: i64,
}

impl fmt::Debug for Nonces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nonces")
            .field("secret", &"[REDACTED]")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish()
    }
}

impl Nonces {
    pub fn new(secret: [u8; SECRET_SIZE], lifetime: Duration) -> Result<Self, NonceError> {
        let lifetime_secs = i64::try_from(lifetime.as_secs()).map_err(|_| NonceError::InvalidLifetime)?;
        if lifetime_secs < 2 {
            return Err(NonceError::InvalidLifetime);
        }
        Ok(Self {
            secret,
            lifetime_secs,
        })
    }

    /// Random secret; nonces issued before a restart stop verifying.
    pub fn generate(lifetime: Duration) -> Result<Self, NonceError> {
        Self::new(rand::random(), lifetime)
    }

    pub fn from_hex(secret: &str, lifetime: Duration) -> Result<Self, NonceError> {
        let bytes = hex::decode(secret.trim()).map_err(|_| NonceError::InvalidSecret)?;
        let secret: [u8; SECRET_SIZE] = bytes.try_into().map_err(|_| NonceError::InvalidSecret)?;
        Self::new(secret, lifetime)
    }

    pub fn issue(&self, action: NonceAction) -> String {
        self.issue_at(action, OffsetDateTime::now_utc().unix_timestamp())
    }

    pub fn verify(&self, action: NonceAction, nonce: &str) -> bool {
        self.verify_at(action, nonce, OffsetDateTime::now_utc().unix_timestamp())
    }

    pub(crate) fn issue_at(&self, action: NonceAction, now: i64) -> String {
        let tag = self.mac(self.tick(now), action).finalize().into_bytes();
        hex::encode(&tag[..NONCE_BYTES])
    }

    pub(crate) fn verify_at(&self, action: NonceAction, nonce: &str, now: i64) -> bool {
        let Ok(bytes) = hex::decode(nonce) else {
            return false;
        };
        if bytes.len() != NONCE_BYTES {
            return false;
        }

        let tick = self.tick(now);
        [tick, tick - 1]
            .into_iter()
            .any(|t| self.mac(t, action).verify_truncated_left(&bytes).is_ok())
    }

    fn tick(&self, now: i64) -> i64 {
        let half = self.lifetime_secs / 2;
        (now + half - 1).div_euclid(half)
    }

    fn mac(&self, tick: i64, action: NonceAction) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length");
        mac.update(format!("{}|{}", tick, action).as_bytes());
        mac
    }
}
