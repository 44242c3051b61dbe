//! Wallet error types.

use arbor_core::error::{AddressError, Bip32Error, EntropyError, MnemonicError};
use thiserror::Error;

/// Errors that can occur in wallet operations.
///
/// Component failures pass through unchanged; nothing is swallowed or
/// replaced with a default value. An invalid mnemonic never produces an
/// address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Entropy generation failure (bad strength or RNG unavailable).
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    /// Mnemonic parsing or checksum failure.
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    /// Key tree derivation failure.
    #[error(transparent)]
    Bip32(#[from] Bip32Error),

    /// Address formatting failure (unsupported coin or network).
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Missing or wrong-typed boundary input.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonic_error_passes_through() {
        let inner = MnemonicError::Invalid("checksum".into());
        let wallet: WalletError = inner.clone().into();
        assert_eq!(wallet, WalletError::Mnemonic(inner));
        assert_eq!(wallet.to_string(), "invalid mnemonic: checksum");
    }

    #[test]
    fn display_invalid_arguments() {
        let e = WalletError::InvalidArguments("missing field `env`".into());
        assert_eq!(e.to_string(), "invalid arguments: missing field `env`");
    }
}
