//! The three wallet operations: create, import, derive address and key.
//!
//! Each call is self-contained: given the same mnemonic and passphrase,
//! [`derive_address_and_key`] re-derives everything from scratch and
//! returns the same result. Seeds and extended keys exist only for the
//! duration of a call.

use std::fmt;

use tracing::debug;

use arbor_core::address::{Address, Coin, Network};
use arbor_core::bip32;
use arbor_core::entropy::{Entropy, Strength};
use arbor_core::mnemonic::Mnemonic;
use arbor_core::path::DerivationPath;
use arbor_core::seed::Seed;

use crate::error::WalletError;

/// The result of a key derivation: an address plus the raw private key.
///
/// The private key crosses this boundary in plaintext hex. The caller
/// owns its safe handling and disposal; this crate never logs it and the
/// `Debug` impl redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct AddressAndKey {
    /// Network-specific address string.
    pub address: String,
    /// Hex-encoded 32-byte private key.
    pub private_key_hex: String,
}

impl fmt::Debug for AddressAndKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressAndKey")
            .field("address", &self.address)
            .field("private_key_hex", &"[REDACTED]")
            .finish()
    }
}

/// Create a new wallet: fresh entropy encoded as a mnemonic.
///
/// The entropy is consumed by the encoding and discarded; the returned
/// mnemonic is the wallet's sole backup.
pub fn create_wallet(strength: Strength) -> Result<Mnemonic, WalletError> {
    let entropy = Entropy::generate(strength)?;
    let mnemonic = Mnemonic::from_entropy(&entropy);
    debug!(words = mnemonic.word_count(), "created wallet mnemonic");
    Ok(mnemonic)
}

/// Import a wallet: validate a mnemonic phrase.
///
/// Validation only; no seed is derived and nothing is kept. A failure
/// here means the phrase must not be used for any further derivation.
pub fn import_wallet(phrase: &str) -> Result<(), WalletError> {
    let mnemonic = Mnemonic::parse(phrase)?;
    debug!(words = mnemonic.word_count(), "imported wallet mnemonic");
    Ok(())
}

/// Derive the standard first address and private key for a coin/network.
///
/// Validates the mnemonic, derives the seed with the given passphrase,
/// walks the (coin, network) standard path, and formats the address.
/// Mainnet and testnet use distinct paths, so the same mnemonic yields a
/// different key and address per network.
pub fn derive_address_and_key(
    phrase: &str,
    passphrase: &str,
    coin: Coin,
    network: Network,
) -> Result<AddressAndKey, WalletError> {
    let mnemonic = Mnemonic::parse(phrase)?;
    let seed = Seed::from_mnemonic(&mnemonic, passphrase);
    let path = DerivationPath::standard(coin, network);
    debug!(%path, ?network, "deriving address and key");

    let key = bip32::derive_path(&seed, &path)?;
    let address = Address::p2wpkh(&key.public_key(), network);

    Ok(AddressAndKey {
        address: address.encode(),
        private_key_hex: hex::encode(key.secret_bytes()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::error::MnemonicError;

    const TEST_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn create_produces_valid_mnemonics() {
        for s in Strength::ALL {
            let m = create_wallet(s).unwrap();
            assert_eq!(m.word_count(), s.word_count());
            assert!(import_wallet(&m.phrase()).is_ok());
        }
    }

    #[test]
    fn import_rejects_garbage() {
        let err = import_wallet("not a real phrase").unwrap_err();
        assert!(matches!(err, WalletError::Mnemonic(MnemonicError::Invalid(_))));
    }

    #[test]
    fn derive_is_deterministic() {
        let a = derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Mainnet).unwrap();
        let b = derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Mainnet).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn networks_are_separated() {
        let mainnet =
            derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Mainnet).unwrap();
        let testnet =
            derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Testnet).unwrap();
        assert_ne!(mainnet.address, testnet.address);
        assert_ne!(mainnet.private_key_hex, testnet.private_key_hex);
    }

    #[test]
    fn passphrase_changes_result() {
        let plain =
            derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Mainnet).unwrap();
        let protected =
            derive_address_and_key(TEST_PHRASE, "hunter2", Coin::Bitcoin, Network::Mainnet)
                .unwrap();
        assert_ne!(plain.address, protected.address);
    }

    #[test]
    fn invalid_mnemonic_never_derives() {
        let phrase = format!("{} zoo", ["abandon"; 11].join(" "));
        assert!(
            derive_address_and_key(&phrase, "", Coin::Bitcoin, Network::Mainnet).is_err()
        );
    }

    #[test]
    fn debug_hides_private_key() {
        let result =
            derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Mainnet).unwrap();
        let debug = format!("{result:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&result.private_key_hex));
    }
}
