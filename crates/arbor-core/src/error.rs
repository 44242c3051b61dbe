//! Error types for the derivation pipeline.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntropyError {
    #[error("unsupported strength: {0} bits")] InvalidStrength(u32),
    #[error("entropy unavailable: {0}")] Unavailable(String),
    #[error("invalid entropy length: {0} bytes")] InvalidLength(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("invalid mnemonic: {0}")] Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Bip32Error {
    #[error("seed length {0} outside 16..=64 bytes")] InvalidSeedLength(usize),
    #[error("seed produced an out-of-range master key")] InvalidSeed,
    #[error("invalid child key at index {index}")] InvalidChildIndex { index: u32 },
    #[error("hardened derivation from a public key")] HardenedFromPublic,
    #[error("derivation depth exhausted")] DepthExhausted,
    #[error("invalid derivation path: {0}")] InvalidPath(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("unsupported coin: {0}")] UnsupportedCoin(String),
    #[error("unknown network: {0}")] UnknownNetwork(String),
    #[error("invalid HRP")] InvalidHrp,
    #[error("missing separator")] MissingSeparator,
    #[error("mixed case")] MixedCase,
    #[error("invalid character: {0}")] InvalidCharacter(char),
    #[error("invalid checksum")] InvalidChecksum,
    #[error("invalid length")] InvalidLength,
    #[error("invalid padding bits")] InvalidPadding,
    #[error("invalid witness version: {0}")] InvalidWitnessVersion(u8),
    #[error("invalid witness program length: {0}")] InvalidProgramLength(usize),
}

/// Umbrella error for callers composing the whole pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)] Entropy(#[from] EntropyError),
    #[error(transparent)] Mnemonic(#[from] MnemonicError),
    #[error(transparent)] Bip32(#[from] Bip32Error),
    #[error(transparent)] Address(#[from] AddressError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_strength() {
        let e = EntropyError::InvalidStrength(100);
        assert_eq!(e.to_string(), "unsupported strength: 100 bits");
    }

    #[test]
    fn display_invalid_child_index() {
        let e = Bip32Error::InvalidChildIndex { index: 7 };
        assert_eq!(e.to_string(), "invalid child key at index 7");
    }

    #[test]
    fn core_error_from_mnemonic() {
        let m = MnemonicError::Invalid("word count".into());
        let core: CoreError = m.clone().into();
        assert_eq!(core, CoreError::Mnemonic(m));
        assert_eq!(core.to_string(), "invalid mnemonic: word count");
    }

    #[test]
    fn clone_and_eq() {
        let e1 = AddressError::InvalidCharacter('b');
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }
}
