//! Segwit address encoding for Bitcoin.
//!
//! P2WPKH ([BIP-141]) addresses in Bech32 ([BIP-173]):
//! - Mainnet: `bc1...`
//! - Testnet: `tb1...`
//!
//! The witness program is HASH160 of the compressed public key; the
//! address carries witness version 0 plus the program in 5-bit groups with
//! a Bech32 checksum. Formatting is a pure lookup-and-transform: the same
//! key and (coin, network) always produce the same string, and the same
//! key on different networks always produces different strings.
//!
//! [BIP-141]: https://github.com/bitcoin/bips/blob/master/bip-0141.mediawiki
//! [BIP-173]: https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki

use std::fmt;
use std::str::FromStr;

use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};

use crate::bip32::hash160;
use crate::error::AddressError;

/// Bech32 checksum constant (BIP-173; Bech32m uses a different one).
const BECH32_CONST: u32 = 1;

/// Bech32 character set for encoding 5-bit values.
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Coins this formatter knows how to encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    Bitcoin,
}

impl Coin {
    /// BIP-44 coin type for the derivation path. Testnet uses coin type 1
    /// for every coin, which is what keeps test keys off mainnet paths.
    pub fn coin_type(self, network: Network) -> u32 {
        match (self, network) {
            (Coin::Bitcoin, Network::Mainnet) => 0,
            (Coin::Bitcoin, Network::Testnet) => 1,
        }
    }
}

impl FromStr for Coin {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Coin::Bitcoin),
            other => Err(AddressError::UnsupportedCoin(other.to_string())),
        }
    }
}

/// Network identifier determining the address prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Mainnet (HRP: "bc", addresses start with `bc1`).
    Mainnet,
    /// Testnet (HRP: "tb", addresses start with `tb1`).
    Testnet,
}

impl Network {
    /// Human-readable prefix for this network.
    pub fn hrp(&self) -> &'static str {
        match self {
            Network::Mainnet => "bc",
            Network::Testnet => "tb",
        }
    }

    /// Look up network from a human-readable prefix.
    pub fn from_hrp(hrp: &str) -> Result<Self, AddressError> {
        match hrp {
            "bc" => Ok(Network::Mainnet),
            "tb" => Ok(Network::Testnet),
            _ => Err(AddressError::UnknownNetwork(hrp.to_string())),
        }
    }
}

impl FromStr for Network {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(AddressError::UnknownNetwork(other.to_string())),
        }
    }
}

/// A segwit address: network, witness version, and witness program.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    witness_version: u8,
    program: Vec<u8>,
}

impl Address {
    /// P2WPKH address for a compressed public key.
    pub fn p2wpkh(public_key: &PublicKey, network: Network) -> Self {
        Self {
            network,
            witness_version: 0,
            program: hash160(&public_key.serialize()).to_vec(),
        }
    }

    /// The network this address belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// The segwit witness version (0 for P2WPKH).
    pub fn witness_version(&self) -> u8 {
        self.witness_version
    }

    /// The witness program bytes (the pubkey hash for P2WPKH).
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /// Encode this address as a Bech32 string.
    pub fn encode(&self) -> String {
        let hrp = self.network.hrp();
        // Witness version is one bare 5-bit value; the program follows
        // regrouped from 8-bit to 5-bit
        let mut payload = vec![self.witness_version];
        payload.extend(
            convert_bits(&self.program, 8, 5, true)
                .expect("8-to-5 regrouping with padding is total"),
        );

        let checksum = bech32_create_checksum(hrp, &payload);

        let mut result = String::with_capacity(hrp.len() + 1 + payload.len() + 6);
        result.push_str(hrp);
        result.push('1');
        for &d in payload.iter().chain(&checksum) {
            result.push(CHARSET[d as usize] as char);
        }
        result
    }

    /// Decode a Bech32 segwit address string.
    pub fn decode(s: &str) -> Result<Self, AddressError> {
        // Reject mixed case (all alpha chars must be the same case)
        let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(AddressError::MixedCase);
        }

        let s_lower = s.to_ascii_lowercase();
        let sep_pos = s_lower.rfind('1').ok_or(AddressError::MissingSeparator)?;
        if sep_pos == 0 {
            return Err(AddressError::InvalidHrp);
        }
        // At least the version char plus 6 checksum chars must follow
        if sep_pos + 8 > s_lower.len() {
            return Err(AddressError::InvalidLength);
        }

        let hrp = &s_lower[..sep_pos];
        let network = Network::from_hrp(hrp)?;

        let mut payload = Vec::with_capacity(s_lower.len() - sep_pos - 1);
        for c in s_lower[sep_pos + 1..].chars() {
            let value = CHARSET
                .iter()
                .position(|&ch| ch as char == c)
                .ok_or(AddressError::InvalidCharacter(c))?;
            payload.push(value as u8);
        }

        if !bech32_verify_checksum(hrp, &payload) {
            return Err(AddressError::InvalidChecksum);
        }

        let data = &payload[..payload.len() - 6];
        let witness_version = data[0];
        if witness_version > 16 {
            return Err(AddressError::InvalidWitnessVersion(witness_version));
        }
        let program = convert_bits(&data[1..], 5, 8, false)?;
        // BIP-141: version 0 programs are exactly 20 (P2WPKH) or 32
        // (P2WSH) bytes
        let valid_len = match witness_version {
            0 => matches!(program.len(), 20 | 32),
            _ => (2..=40).contains(&program.len()),
        };
        if !valid_len {
            return Err(AddressError::InvalidProgramLength(program.len()));
        }

        Ok(Self {
            network,
            witness_version,
            program,
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

/// Bech32 polymod step (BIP-173).
fn polymod(values: &[u8]) -> u32 {
    const GEN: [u32; 5] = [
        0x3b6a_57b2,
        0x2650_8e6d,
        0x1ea1_19fa,
        0x3d42_33dd,
        0x2a14_62b3,
    ];
    let mut chk: u32 = 1;
    for &v in values {
        let b = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(v);
        for (i, &g) in GEN.iter().enumerate() {
            if (b >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }
    chk
}

/// Expand the HRP for checksum computation.
fn hrp_expand(hrp: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(hrp.len() * 2 + 1);
    out.extend(hrp.bytes().map(|b| b >> 5));
    out.push(0);
    out.extend(hrp.bytes().map(|b| b & 0x1f));
    out
}

fn bech32_create_checksum(hrp: &str, payload: &[u8]) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(payload);
    values.extend_from_slice(&[0; 6]);
    let m = polymod(&values) ^ BECH32_CONST;
    let mut checksum = [0u8; 6];
    for (i, c) in checksum.iter_mut().enumerate() {
        *c = ((m >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}

fn bech32_verify_checksum(hrp: &str, payload: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(payload);
    polymod(&values) == BECH32_CONST
}

/// Regroup bits: `from` bits per value to `to` bits per value.
///
/// Padding is allowed when encoding (8 -> 5) and rejected when decoding
/// (5 -> 8), where non-zero padding means a malformed address.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, AddressError> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    let max_value = (1u32 << to) - 1;
    for &value in data {
        if u32::from(value) >> from != 0 {
            return Err(AddressError::InvalidCharacter(value as char));
        }
        acc = (acc << from) | u32::from(value);
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }
    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(AddressError::InvalidPadding);
    }
    Ok(out)
}
