//! Cipher Map substitution encoding
//!
//! Note content is encoded on the client before it is submitted, so the server only
//! ever stores the substituted text and never sees the map that produced it.
//!
//! # Model
//!
//! A [`CipherMap`] assigns every symbol of the source alphabet (`A-Z` then `0-9`) a
//! random code of 2 to 4 characters drawn from the code alphabet (`a-z0-9`). Codes are
//! pairwise distinct within one map.
//!
//! Encoding uppercases the input and replaces each mapped character with its code.
//! Anything the map does not know about (spaces, punctuation) passes through as-is.
//!
//! # Security
//!
//! This is a plain substitution cipher. It has no diffusion and is trivially broken by
//! frequency analysis. The map is the only key, which is why it is drawn from a CSPRNG
//! by default, but the scheme itself should not be mistaken for encryption.
//!
//! There is deliberately no decoder. Recovering the text is a manual lookup against
//! the displayed map.

mod encode;
mod map;

pub use encode::encode;
pub use map::{CipherMap, CipherMapError};

/// Source symbols in map order.
pub const SYMBOLS: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Characters a code may be built from.
pub const CODE_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";
/// Shortest code a symbol may be assigned.
pub const MIN_CODE_LEN: usize = 2;
/// Longest code a symbol may be assigned.
pub const MAX_CODE_LEN: usize = 4;
