//! Derivation paths through the BIP-32 key tree.
//!
//! A path is an ordered list of child numbers, each normal or hardened.
//! The standard account paths per (coin, network) follow BIP-84, matching
//! the segwit addresses produced by [`crate::address`]:
//!
//! - Bitcoin mainnet: `m/84'/0'/0'/0/0`
//! - Bitcoin testnet: `m/84'/1'/0'/0/0`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::{Coin, Network};
use crate::bip32::HARDENED_OFFSET;
use crate::error::Bip32Error;

/// A single step in a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChildNumber {
    /// Non-hardened child; derivable from the parent public key alone.
    Normal { index: u32 },
    /// Hardened child; requires the parent private key.
    Hardened { index: u32 },
}

impl ChildNumber {
    /// Build a child number, rejecting indexes that collide with the
    /// hardened bit.
    pub fn new(index: u32, hardened: bool) -> Result<Self, Bip32Error> {
        if index >= HARDENED_OFFSET {
            return Err(Bip32Error::InvalidPath(format!(
                "index {index} exceeds 2^31 - 1"
            )));
        }
        Ok(if hardened {
            ChildNumber::Hardened { index }
        } else {
            ChildNumber::Normal { index }
        })
    }

    /// The raw serialized index: hardened children carry the high bit.
    pub fn to_raw(self) -> u32 {
        match self {
            ChildNumber::Normal { index } => index,
            ChildNumber::Hardened { index } => HARDENED_OFFSET | index,
        }
    }

    /// Whether this step requires private-key derivation.
    pub fn is_hardened(self) -> bool {
        matches!(self, ChildNumber::Hardened { .. })
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildNumber::Normal { index } => write!(f, "{index}"),
            ChildNumber::Hardened { index } => write!(f, "{index}'"),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let index: u32 = digits
            .parse()
            .map_err(|_| Bip32Error::InvalidPath(format!("bad path component: {s}")))?;
        ChildNumber::new(index, hardened)
    }
}

/// An ordered sequence of child numbers identifying one key in the tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path (the master key itself).
    pub fn master() -> Self {
        Self(Vec::new())
    }

    /// The standard first-address path for a coin and network.
    ///
    /// BIP-84 account 0, external chain, index 0. Mainnet and testnet use
    /// distinct coin types, so the two networks never share keys.
    pub fn standard(coin: Coin, network: Network) -> Self {
        let coin_type = coin.coin_type(network);
        Self(vec![
            ChildNumber::Hardened { index: 84 },
            ChildNumber::Hardened { index: coin_type },
            ChildNumber::Hardened { index: 0 },
            ChildNumber::Normal { index: 0 },
            ChildNumber::Normal { index: 0 },
        ])
    }

    /// The path steps in derivation order.
    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Extend the path with one more step.
    pub fn child(&self, child: ChildNumber) -> Self {
        let mut steps = self.0.clone();
        steps.push(child);
        Self(steps)
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(steps: Vec<ChildNumber>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for step in &self.0 {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match parts.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(Bip32Error::InvalidPath(format!(
                    "path must start with 'm': {s}"
                )));
            }
        }
        let steps = parts
            .map(ChildNumber::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(steps))
    }
}
