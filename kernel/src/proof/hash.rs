//! Canonical hashing: SHA-256 with typed domain separation.
//!
//! **Exactly one place defines canonical hashing.** Digests render as
//! `"sha256:<hex>"` and round-trip through [`ContentHash::parse`].

use sha2::{Digest, Sha256};

pub use crate::proof::hash_domain::HashDomain;

/// Algorithm tag written in front of every digest.
pub const HASH_ALGORITHM: &str = "sha256";

/// A content-addressed hash with algorithm identifier.
///
/// Invariant: the inner string contains a `:` separator with non-empty
/// substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the separator is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon + 1 == s.len() {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Hash `data` under `domain`: `sha256(domain_bytes || data)`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let hex_digest = hex::encode(hasher.finalize());
    ContentHash {
        colon: HASH_ALGORITHM.len(),
        full: format!("{HASH_ALGORITHM}:{hex_digest}"),
    }
}
