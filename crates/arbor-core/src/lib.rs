//! # arbor-core
//! Primitives for hierarchical-deterministic wallets.
//!
//! The derivation pipeline runs left to right:
//!
//! ```text
//! entropy -> mnemonic -> seed -> extended key tree -> address
//! ```
//!
//! # Modules
//!
//! - [`entropy`] — CSPRNG entropy of a chosen bit-strength
//! - [`mnemonic`] — BIP-39 phrase encoding, validation, normalization
//! - [`seed`] — PBKDF2 seed derivation from (mnemonic, passphrase)
//! - [`bip32`] — BIP-32 extended keys over secp256k1
//! - [`path`] — derivation paths and per-network standard paths
//! - [`address`] — segwit (P2WPKH) address encoding
//! - [`error`] — error enums for every stage

pub mod address;
pub mod bip32;
pub mod entropy;
pub mod error;
pub mod mnemonic;
pub mod path;
pub mod seed;

// Re-exports for convenient access
pub use address::{Address, Coin, Network};
pub use bip32::{ExtendedPrivKey, ExtendedPubKey, HARDENED_OFFSET};
pub use entropy::{Entropy, Strength};
pub use error::{AddressError, Bip32Error, CoreError, EntropyError, MnemonicError};
pub use mnemonic::Mnemonic;
pub use path::{ChildNumber, DerivationPath};
pub use seed::Seed;
