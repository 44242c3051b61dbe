//! End-to-end derivation against published reference vectors.
//!
//! The standard 12-word test mnemonic (16 zero bytes of entropy) must
//! reproduce the BIP-39 reference seed and the BIP-84 first-account
//! addresses exactly. Any drift here means wallets that cannot be
//! recovered elsewhere.

use arbor_core::address::{Coin, Network};
use arbor_core::entropy::Entropy;
use arbor_core::mnemonic::Mnemonic;
use arbor_core::seed::Seed;
use arbor_wallet::{derive_address_and_key, import_wallet};

const TEST_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

#[test]
fn test_phrase_round_trips_through_codec() {
    let entropy = Entropy::from_bytes(vec![0u8; 16]).unwrap();
    let mnemonic = Mnemonic::from_entropy(&entropy);
    assert_eq!(mnemonic.phrase(), TEST_PHRASE);
    assert!(import_wallet(TEST_PHRASE).is_ok());
}

#[test]
fn reference_seed_matches_bip39_vector() {
    let mnemonic = Mnemonic::parse(TEST_PHRASE).unwrap();
    let seed = Seed::from_mnemonic(&mnemonic, "");
    assert_eq!(
        hex::encode(seed.as_bytes()),
        "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
         9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
    );
}

#[test]
fn mainnet_address_matches_bip84_vector() {
    let result = derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Mainnet).unwrap();
    // First receiving address at m/84'/0'/0'/0/0
    assert_eq!(result.address, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
    assert_eq!(result.private_key_hex.len(), 64);
}

#[test]
fn testnet_address_matches_bip84_vector() {
    let result = derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Testnet).unwrap();
    // First receiving address at m/84'/1'/0'/0/0
    assert_eq!(result.address, "tb1q6rz28mcfaxtmd6v789l9rrlrusdprr9pqcpvkl");
}

#[test]
fn sloppy_input_derives_the_same_wallet() {
    // Normalization is part of the contract: case and whitespace noise
    // must not change the derived wallet.
    let messy = format!("  {}  ", TEST_PHRASE.to_uppercase().replace(' ', "  "));
    let clean = derive_address_and_key(TEST_PHRASE, "", Coin::Bitcoin, Network::Mainnet).unwrap();
    let noisy = derive_address_and_key(&messy, "", Coin::Bitcoin, Network::Mainnet).unwrap();
    assert_eq!(clean, noisy);
}
