//! Entropy generation for wallet creation.
//!
//! Entropy is drawn from the OS cryptographic RNG and is used exactly once,
//! to encode a mnemonic. RNG failure is surfaced as an error, never papered
//! over with weaker randomness.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::error::EntropyError;

/// Supported entropy strengths for mnemonic generation.
///
/// Each strength maps to a fixed BIP-39 word count:
/// 128 -> 12, 160 -> 15, 192 -> 18, 224 -> 21, 256 -> 24.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strength {
    Bits128,
    Bits160,
    Bits192,
    Bits224,
    Bits256,
}

impl Strength {
    /// All supported strengths, weakest first.
    pub const ALL: [Strength; 5] = [
        Strength::Bits128,
        Strength::Bits160,
        Strength::Bits192,
        Strength::Bits224,
        Strength::Bits256,
    ];

    /// Parse a numeric bit-strength, rejecting unsupported values.
    pub fn from_bits(bits: u32) -> Result<Self, EntropyError> {
        match bits {
            128 => Ok(Strength::Bits128),
            160 => Ok(Strength::Bits160),
            192 => Ok(Strength::Bits192),
            224 => Ok(Strength::Bits224),
            256 => Ok(Strength::Bits256),
            other => Err(EntropyError::InvalidStrength(other)),
        }
    }

    /// Strength in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Strength::Bits128 => 128,
            Strength::Bits160 => 160,
            Strength::Bits192 => 192,
            Strength::Bits224 => 224,
            Strength::Bits256 => 256,
        }
    }

    /// Entropy length in bytes.
    pub const fn byte_len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Word count of the mnemonic this strength encodes to.
    ///
    /// Checksum adds bits/32 bits; each word carries 11 bits.
    pub const fn word_count(self) -> usize {
        (self.bits() as usize + self.bits() as usize / 32) / 11
    }
}

/// Raw entropy bytes, zeroized on drop.
pub struct Entropy {
    bytes: Zeroizing<Vec<u8>>,
}

impl Entropy {
    /// Generate fresh entropy from the OS cryptographic RNG.
    ///
    /// Fails with [`EntropyError::Unavailable`] if the OS RNG cannot
    /// deliver; there is no fallback source.
    pub fn generate(strength: Strength) -> Result<Self, EntropyError> {
        let mut bytes = Zeroizing::new(vec![0u8; strength.byte_len()]);
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| EntropyError::Unavailable(e.to_string()))?;
        Ok(Self { bytes })
    }

    /// Wrap existing bytes, validating the length against the supported
    /// strengths.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, EntropyError> {
        if !matches!(bytes.len(), 16 | 20 | 24 | 28 | 32) {
            return Err(EntropyError::InvalidLength(bytes.len()));
        }
        Ok(Self {
            bytes: Zeroizing::new(bytes),
        })
    }

    /// The raw entropy bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The strength these bytes correspond to.
    pub fn strength(&self) -> Strength {
        match self.bytes.len() {
            16 => Strength::Bits128,
            20 => Strength::Bits160,
            24 => Strength::Bits192,
            28 => Strength::Bits224,
            // from_bytes/generate admit no other length
            _ => Strength::Bits256,
        }
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entropy")
            .field("bytes", &"[REDACTED]")
            .field("len", &self.bytes.len())
            .finish()
    }
}
