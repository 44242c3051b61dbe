//! BIP-32 extended keys over secp256k1.
//!
//! Master key: `HMAC-SHA512(key = "Bitcoin seed", data = seed)`; the left
//! half is the master secret, the right half the chain code. Child keys
//! fold the parent key (private for hardened steps, public otherwise) and
//! the child index through the same HMAC. Every operation is a pure
//! function of its inputs; nothing is cached between calls.
//!
//! The out-of-range edge cases the standard mandates (IL = 0 or IL >= n,
//! probability ~2^-127) are surfaced as errors rather than ignored; a
//! caller that hits one may retry with the next index.

use std::fmt;

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::{Digest, Sha256, Sha512};

use crate::error::Bip32Error;
use crate::path::{ChildNumber, DerivationPath};
use crate::seed::Seed;

type HmacSha512 = Hmac<Sha512>;

/// First hardened child index (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key fixed by BIP-32 for master key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// HASH160: RIPEMD-160 of SHA-256. Used for key fingerprints and P2WPKH
/// witness programs.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let ripe = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripe);
    out
}

/// 4-byte key fingerprint: HASH160(compressed pubkey)[0..4].
fn fingerprint(public_key: &PublicKey) -> [u8; 4] {
    let mut fp = [0u8; 4];
    fp.copy_from_slice(&hash160(&public_key.serialize())[..4]);
    fp
}

/// An extended private key: secret key, chain code, and tree position.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedPrivKey {
    /// Distance from the master key (0 for the master itself).
    pub depth: u8,
    /// Fingerprint of the parent key ([0; 4] for the master).
    pub parent_fingerprint: [u8; 4],
    /// The index this key was derived at.
    pub child_number: ChildNumber,
    /// Chain code extending the key for child derivation.
    pub chain_code: [u8; 32],
    secret_key: SecretKey,
}

impl ExtendedPrivKey {
    /// Derive the master key from a seed.
    ///
    /// Accepts 16 to 64 seed bytes per BIP-32. Fails with `InvalidSeed`
    /// in the astronomically rare case that the HMAC output is not a
    /// valid secp256k1 secret key.
    pub fn master(seed: &[u8]) -> Result<Self, Bip32Error> {
        if !(16..=64).contains(&seed.len()) {
            return Err(Bip32Error::InvalidSeedLength(seed.len()));
        }
        let mut mac = HmacSha512::new_from_slice(MASTER_HMAC_KEY)
            .expect("HMAC accepts any key length");
        mac.update(seed);
        let digest = mac.finalize().into_bytes();

        let secret_key =
            SecretKey::from_slice(&digest[..32]).map_err(|_| Bip32Error::InvalidSeed)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&digest[32..]);

        Ok(Self {
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: ChildNumber::Normal { index: 0 },
            chain_code,
            secret_key,
        })
    }

    /// Derive one child key (CKDpriv).
    ///
    /// Hardened children commit to the parent private key, normal children
    /// to the parent public key. Fails with `InvalidChildIndex` on the
    /// out-of-range edge case; the caller may retry with the next index.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, Bip32Error> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or(Bip32Error::DepthExhausted)?;
        let secp = Secp256k1::new();
        let parent_public = PublicKey::from_secret_key(&secp, &self.secret_key);

        let mut mac = HmacSha512::new_from_slice(&self.chain_code)
            .expect("HMAC accepts any key length");
        match child {
            ChildNumber::Hardened { .. } => {
                mac.update(&[0x00]);
                mac.update(&self.secret_key.secret_bytes());
            }
            ChildNumber::Normal { .. } => {
                mac.update(&parent_public.serialize());
            }
        }
        mac.update(&child.to_raw().to_be_bytes());
        let digest = mac.finalize().into_bytes();

        let mut il = [0u8; 32];
        il.copy_from_slice(&digest[..32]);
        let invalid = Bip32Error::InvalidChildIndex {
            index: child.to_raw(),
        };
        // Rejects IL >= n; add_tweak rejects a zero result.
        let tweak = Scalar::from_be_bytes(il).map_err(|_| invalid.clone())?;
        let secret_key = self.secret_key.add_tweak(&tweak).map_err(|_| invalid)?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&digest[32..]);

        Ok(Self {
            depth,
            parent_fingerprint: fingerprint(&parent_public),
            child_number: child,
            chain_code,
            secret_key,
        })
    }

    /// Fold [`Self::derive_child`] over a path, starting from this key.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, Bip32Error> {
        path.as_slice()
            .iter()
            .try_fold(self.clone(), |key, &child| key.derive_child(child))
    }

    /// The compressed public key for this extended key.
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        PublicKey::from_secret_key(&secp, &self.secret_key)
    }

    /// The raw 32-byte secret key. Handle with care.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret_key.secret_bytes()
    }

    /// This key's fingerprint (identifies it as a parent).
    pub fn fingerprint(&self) -> [u8; 4] {
        fingerprint(&self.public_key())
    }

    /// The watch-only counterpart of this key.
    pub fn to_extended_pub(&self) -> ExtendedPubKey {
        ExtendedPubKey {
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            chain_code: self.chain_code,
            public_key: self.public_key(),
        }
    }
}

impl fmt::Debug for ExtendedPrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPrivKey")
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .field("secret_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// An extended public key: supports normal (non-hardened) child
/// derivation without any private material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPubKey {
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: ChildNumber,
    pub chain_code: [u8; 32],
    pub public_key: PublicKey,
}

impl ExtendedPubKey {
    /// Derive one child key (CKDpub). Normal children only; hardened
    /// steps need the private key and fail with `HardenedFromPublic`.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, Bip32Error> {
        if child.is_hardened() {
            return Err(Bip32Error::HardenedFromPublic);
        }
        let depth = self
            .depth
            .checked_add(1)
            .ok_or(Bip32Error::DepthExhausted)?;
        let secp = Secp256k1::new();

        let mut mac = HmacSha512::new_from_slice(&self.chain_code)
            .expect("HMAC accepts any key length");
        mac.update(&self.public_key.serialize());
        mac.update(&child.to_raw().to_be_bytes());
        let digest = mac.finalize().into_bytes();

        let mut il = [0u8; 32];
        il.copy_from_slice(&digest[..32]);
        let invalid = Bip32Error::InvalidChildIndex {
            index: child.to_raw(),
        };
        let tweak = Scalar::from_be_bytes(il).map_err(|_| invalid.clone())?;
        let public_key = self
            .public_key
            .add_exp_tweak(&secp, &tweak)
            .map_err(|_| invalid)?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&digest[32..]);

        Ok(Self {
            depth,
            parent_fingerprint: fingerprint(&self.public_key),
            child_number: child,
            chain_code,
            public_key,
        })
    }

    /// This key's fingerprint.
    pub fn fingerprint(&self) -> [u8; 4] {
        fingerprint(&self.public_key)
    }
}

/// Walk a path from a seed: master key, then one child per step.
pub fn derive_path(seed: &Seed, path: &DerivationPath) -> Result<ExtendedPrivKey, Bip32Error> {
    ExtendedPrivKey::master(seed.as_bytes())?.derive_path(path)
}
