//! BIP-39 mnemonic encoding and validation.
//!
//! The mnemonic is the only durable representation a user can back up, so
//! the rules here are deliberately strict and pinned by tests:
//!
//! - Input phrases are normalized before anything else: Unicode whitespace
//!   runs collapse to a single ASCII space, leading/trailing whitespace is
//!   trimmed, and the phrase is lowercased. The normalized form is what is
//!   validated and what feeds seed derivation.
//! - Word counts other than 12/15/18/21/24, words outside the English
//!   wordlist, and checksum mismatches are all rejected; an invalid phrase
//!   never falls through to seed derivation.

use std::fmt;

use bip39::Language;

use crate::entropy::Entropy;
use crate::error::MnemonicError;

/// A validated BIP-39 mnemonic phrase (English wordlist).
///
/// Construction always goes through checksum validation; holding a
/// `Mnemonic` means the phrase is well-formed.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl Mnemonic {
    /// Encode entropy as a mnemonic phrase.
    ///
    /// Appends the SHA-256 checksum (entropy bits / 32 bits of it), splits
    /// the result into 11-bit groups, and maps each group to a wordlist
    /// index. Total for every supported entropy length.
    pub fn from_entropy(entropy: &Entropy) -> Self {
        let inner = bip39::Mnemonic::from_entropy_in(Language::English, entropy.as_bytes())
            .expect("supported entropy lengths always encode");
        Self { inner }
    }

    /// Parse and validate a phrase, applying [`normalize`] first.
    pub fn parse(phrase: &str) -> Result<Self, MnemonicError> {
        let normalized = normalize(phrase);
        let inner = bip39::Mnemonic::parse_in(Language::English, &normalized)
            .map_err(|e| MnemonicError::Invalid(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Decode the mnemonic back to its entropy.
    pub fn to_entropy(&self) -> Entropy {
        Entropy::from_bytes(self.inner.to_entropy())
            .expect("wordlist entropy lengths are always supported")
    }

    /// The normalized phrase, words joined by single spaces.
    pub fn phrase(&self) -> String {
        self.inner.to_string()
    }

    /// Number of words in the phrase.
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    pub(crate) fn inner(&self) -> &bip39::Mnemonic {
        &self.inner
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("phrase", &"[REDACTED]")
            .field("words", &self.word_count())
            .finish()
    }
}

/// Pin down phrase normalization: collapse whitespace runs to one ASCII
/// space, trim, lowercase. Any deviation here would silently derive a
/// different seed, so the rules live in one place and are tested.
pub fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether a phrase parses and passes checksum validation.
pub fn validate(phrase: &str) -> bool {
    Mnemonic::parse(phrase).is_ok()
}
