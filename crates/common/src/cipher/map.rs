use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use serde::Serialize;

use super::{CODE_ALPHABET, MAX_CODE_LEN, MIN_CODE_LEN, SYMBOLS};

/// Errors raised when building a map from explicit codes
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CipherMapError {
    #[error("symbol '{0}' is not part of the cipher alphabet")]
    UnknownSymbol(char),
    #[error("code '{code}' for symbol '{symbol}' is invalid")]
    InvalidCode { symbol: char, code: String },
    #[error("code '{0}' is assigned to more than one symbol")]
    DuplicateCode(String),
    #[error("symbol '{0}' has no code")]
    MissingSymbol(char),
}

/// A complete symbol-to-code substitution table.
///
/// Always holds exactly one code for each of the 36 symbols in [`SYMBOLS`], and no two
/// symbols share a code. A map lives only in the memory of the session that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CipherMap {
    codes: BTreeMap<char, String>,
}

impl CipherMap {
    /// Generate a fresh map from the thread-local CSPRNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generate a fresh map from the given generator.
    ///
    /// Symbols are visited in alphabet order. Each one draws codes until it gets one no
    /// earlier symbol holds. Retries are unbounded; with ~1.7M possible codes and only 36
    /// assignments a collision is rare and a second one rarer still.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut codes = BTreeMap::new();
        let mut used = HashSet::with_capacity(SYMBOLS.len());

        for symbol in SYMBOLS.iter().map(|&s| s as char) {
            let code = loop {
                let candidate = random_code(rng);
                if used.insert(candidate.clone()) {
                    break candidate;
                }
                tracing::trace!(%symbol, "cipher code collision, redrawing");
            };
            codes.insert(symbol, code);
        }

        Self { codes }
    }

    /// Build a map from explicit `(symbol, code)` pairs.
    ///
    /// Lowercase letters are accepted as symbols and folded to uppercase. Every symbol
    /// must be present exactly once with a well-formed, unique code.
    pub fn from_codes<I, S>(pairs: I) -> Result<Self, CipherMapError>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut codes = BTreeMap::new();
        let mut used = HashSet::new();

        for (symbol, code) in pairs {
            let symbol = symbol.to_ascii_uppercase();
            if !symbol.is_ascii() || !SYMBOLS.contains(&(symbol as u8)) {
                return Err(CipherMapError::UnknownSymbol(symbol));
            }
            let code = code.into();
            if !is_valid_code(&code) {
                return Err(CipherMapError::InvalidCode { symbol, code });
            }
            if !used.insert(code.clone()) {
                return Err(CipherMapError::DuplicateCode(code));
            }
            if let Some(previous) = codes.insert(symbol, code) {
                used.remove(&previous);
            }
        }

        if let Some(&missing) = SYMBOLS.iter().find(|s| !codes.contains_key(&(**s as char))) {
            return Err(CipherMapError::MissingSymbol(missing as char));
        }

        Ok(Self { codes })
    }

    /// Code assigned to `symbol`, if it is in the alphabet
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    /// `(symbol, code)` pairs in alphabet order (`A..Z` then `0..9`).
    pub fn rows(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        SYMBOLS.iter().filter_map(move |&s| {
            let symbol = s as char;
            self.get(symbol).map(|code| (symbol, code))
        })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Encode `text` against this map. See [`super::encode`].
    pub fn encode(&self, text: &str) -> String {
        super::encode(text, self)
    }
}

fn random_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(MIN_CODE_LEN..=MAX_CODE_LEN);
    (0..len)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

fn is_valid_code(code: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len())
        && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}
