//! PBKDF2 seed derivation from a mnemonic and passphrase.
//!
//! `seed = PBKDF2-HMAC-SHA512(password = normalized phrase,
//! salt = "mnemonic" || passphrase, 2048 iterations, 64 bytes)` per BIP-39.
//! Determinism here is the entire basis for wallet recovery, so the
//! reference vectors are pinned in tests. The passphrase is used as given
//! and must already be NFKD-normalized by the caller; it is never stored.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::mnemonic::Mnemonic;

/// A 64-byte wallet seed, zeroized on drop.
///
/// Computed transiently on demand; nothing in this crate caches a seed
/// between calls.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; 64],
}

impl Seed {
    /// Derive the seed for a mnemonic and passphrase.
    ///
    /// Pure and deterministic: identical inputs always yield identical
    /// bytes. An empty passphrase is the common case.
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Self {
        Self {
            bytes: mnemonic.inner().to_seed(passphrase),
        }
    }

    /// Wrap raw seed bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self { bytes }
    }

    /// The raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }
}

impl Clone for Seed {
    fn clone(&self) -> Self {
        Self { bytes: self.bytes }
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
