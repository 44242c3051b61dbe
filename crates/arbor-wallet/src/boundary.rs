//! Typed boundary contract for host applications.
//!
//! A host bridge (mobile shell, RPC layer, CLI) talks to the wallet
//! through a closed set of operations instead of stringly-typed method
//! dispatch: requests are a tagged enum, responses and errors are plain
//! data. Argument problems surface as errors before any cryptography
//! runs, and a failed operation never returns a partial result.
//!
//! The `env` argument keeps its legacy semantics: the literal `"DEV"`
//! selects testnet derivation and encoding, anything else selects
//! mainnet.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use arbor_core::address::{Coin, Network};
use arbor_core::entropy::Strength;

use crate::error::WalletError;
use crate::wallet;

/// Environment sentinel selecting testnet.
const DEV_ENV: &str = "DEV";

/// Wallet creation uses 128-bit entropy (12 words), matching the
/// original application contract.
const CREATE_STRENGTH: Strength = Strength::Bits128;

/// A wallet operation request.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum WalletRequest {
    /// Generate a new mnemonic.
    CreateWallet,
    /// Validate a mnemonic phrase.
    ImportWallet { mnemonic: String },
    /// Derive the Bitcoin address and private key for an environment.
    GetBitcoinAddressAndKey { env: String, mnemonic: String },
}

impl WalletRequest {
    /// Parse a request from a JSON value of the form
    /// `{"method": "...", ...args}`.
    ///
    /// Missing or wrong-typed fields map to the error code of the method
    /// being called; an unknown method maps to
    /// [`ErrorCode::MethodNotImplemented`].
    pub fn from_json(value: &Value) -> Result<Self, BoundaryError> {
        let code = match value.get("method").and_then(Value::as_str) {
            Some("createWallet") => ErrorCode::CreateWalletError,
            Some("importWallet") => ErrorCode::ImportWalletError,
            Some("getBitcoinAddressAndKey") => ErrorCode::GetBitcoinAddressAndKeyError,
            other => {
                return Err(BoundaryError {
                    code: ErrorCode::MethodNotImplemented,
                    message: format!("unknown method: {}", other.unwrap_or("<missing>")),
                });
            }
        };
        serde_json::from_value(value.clone()).map_err(|e| BoundaryError {
            code,
            message: format!("missing or invalid arguments: {e}"),
        })
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            WalletRequest::CreateWallet => ErrorCode::CreateWalletError,
            WalletRequest::ImportWallet { .. } => ErrorCode::ImportWalletError,
            WalletRequest::GetBitcoinAddressAndKey { .. } => {
                ErrorCode::GetBitcoinAddressAndKeyError
            }
        }
    }
}

impl std::fmt::Debug for WalletRequest {
    // Mnemonics are secrets; requests must be loggable without leaking
    // them
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletRequest::CreateWallet => f.write_str("CreateWallet"),
            WalletRequest::ImportWallet { .. } => f.write_str("ImportWallet { .. }"),
            WalletRequest::GetBitcoinAddressAndKey { env, .. } => f
                .debug_struct("GetBitcoinAddressAndKey")
                .field("env", env)
                .finish_non_exhaustive(),
        }
    }
}

/// A successful wallet operation result.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WalletResponse {
    /// New wallet mnemonic phrase.
    Mnemonic(String),
    /// Import succeeded.
    Imported(bool),
    /// Derived address and raw private key hex.
    #[serde(rename_all = "camelCase")]
    BitcoinAddressAndKey {
        bitcoin_address: String,
        bitcoin_key: String,
    },
}

impl std::fmt::Debug for WalletResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletResponse::Mnemonic(_) => f.write_str("Mnemonic([REDACTED])"),
            WalletResponse::Imported(ok) => write!(f, "Imported({ok})"),
            WalletResponse::BitcoinAddressAndKey {
                bitcoin_address, ..
            } => f
                .debug_struct("BitcoinAddressAndKey")
                .field("bitcoin_address", bitcoin_address)
                .finish_non_exhaustive(),
        }
    }
}

/// Boundary error code, one per operation plus dispatch failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    CreateWalletError,
    ImportWalletError,
    GetBitcoinAddressAndKeyError,
    MethodNotImplemented,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCode::CreateWalletError => "CreateWalletError",
            ErrorCode::ImportWalletError => "ImportWalletError",
            ErrorCode::GetBitcoinAddressAndKeyError => "GetBitcoinAddressAndKeyError",
            ErrorCode::MethodNotImplemented => "MethodNotImplemented",
        };
        f.write_str(s)
    }
}

/// A failed wallet operation: code plus human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct BoundaryError {
    pub code: ErrorCode,
    pub message: String,
}

/// Execute a wallet request.
///
/// Every core failure maps to the operation's error code with the core
/// error's message; argument problems are caught before derivation.
pub fn handle(request: &WalletRequest) -> Result<WalletResponse, BoundaryError> {
    let code = request.error_code();
    let run = || -> Result<WalletResponse, WalletError> {
        match request {
            WalletRequest::CreateWallet => {
                let mnemonic = wallet::create_wallet(CREATE_STRENGTH)?;
                Ok(WalletResponse::Mnemonic(mnemonic.phrase()))
            }
            WalletRequest::ImportWallet { mnemonic } => {
                require_non_empty("mnemonic", mnemonic)?;
                wallet::import_wallet(mnemonic)?;
                Ok(WalletResponse::Imported(true))
            }
            WalletRequest::GetBitcoinAddressAndKey { env, mnemonic } => {
                require_non_empty("mnemonic", mnemonic)?;
                let network = network_for_env(env);
                let derived =
                    wallet::derive_address_and_key(mnemonic, "", Coin::Bitcoin, network)?;
                Ok(WalletResponse::BitcoinAddressAndKey {
                    bitcoin_address: derived.address,
                    bitcoin_key: derived.private_key_hex,
                })
            }
        }
    };
    run().map_err(|e| BoundaryError {
        code,
        message: e.to_string(),
    })
}

/// Map the environment sentinel to a network. Only the literal "DEV"
/// selects testnet; every other value, the empty string included, is
/// production. A missing field is a parse error, not a mainnet default.
fn network_for_env(env: &str) -> Network {
    if env == DEV_ENV {
        Network::Testnet
    } else {
        Network::Mainnet
    }
}

fn require_non_empty(name: &str, value: &str) -> Result<(), WalletError> {
    if value.trim().is_empty() {
        return Err(WalletError::InvalidArguments(format!(
            "missing field `{name}`"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn create_wallet_returns_twelve_words() {
        let response = handle(&WalletRequest::CreateWallet).unwrap();
        match response {
            WalletResponse::Mnemonic(phrase) => {
                assert_eq!(phrase.split_whitespace().count(), 12);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn import_valid_phrase_succeeds() {
        let request = WalletRequest::ImportWallet {
            mnemonic: TEST_PHRASE.to_string(),
        };
        assert_eq!(handle(&request).unwrap(), WalletResponse::Imported(true));
    }

    #[test]
    fn import_invalid_phrase_fails_with_code() {
        let request = WalletRequest::ImportWallet {
            mnemonic: "not a real phrase".to_string(),
        };
        let err = handle(&request).unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportWalletError);
        assert!(err.message.contains("invalid mnemonic"));
    }

    #[test]
    fn env_selects_network() {
        let dev = handle(&WalletRequest::GetBitcoinAddressAndKey {
            env: "DEV".into(),
            mnemonic: TEST_PHRASE.into(),
        })
        .unwrap();
        let prod = handle(&WalletRequest::GetBitcoinAddressAndKey {
            env: "PROD".into(),
            mnemonic: TEST_PHRASE.into(),
        })
        .unwrap();
        match (dev, prod) {
            (
                WalletResponse::BitcoinAddressAndKey {
                    bitcoin_address: dev_addr,
                    bitcoin_key: dev_key,
                },
                WalletResponse::BitcoinAddressAndKey {
                    bitcoin_address: prod_addr,
                    bitcoin_key: prod_key,
                },
            ) => {
                assert!(dev_addr.starts_with("tb1"));
                assert!(prod_addr.starts_with("bc1"));
                assert_ne!(dev_key, prod_key);
            }
            other => panic!("unexpected responses: {other:?}"),
        }
    }

    #[test]
    fn empty_mnemonic_is_rejected() {
        let err = handle(&WalletRequest::GetBitcoinAddressAndKey {
            env: "DEV".into(),
            mnemonic: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::GetBitcoinAddressAndKeyError);
        assert!(err.message.contains("missing field `mnemonic`"));
    }

    #[test]
    fn non_dev_env_values_derive_mainnet() {
        // Anything that is not the literal "DEV" is production, the
        // empty string included; only an absent field is an error.
        for env in ["", "PROD", "staging", "dev"] {
            let response = handle(&WalletRequest::GetBitcoinAddressAndKey {
                env: env.into(),
                mnemonic: TEST_PHRASE.into(),
            })
            .unwrap();
            match response {
                WalletResponse::BitcoinAddressAndKey {
                    bitcoin_address, ..
                } => {
                    assert!(
                        bitcoin_address.starts_with("bc1"),
                        "env {env:?} derived {bitcoin_address}"
                    );
                }
                other => panic!("unexpected response: {other:?}"),
            }
        }
    }

    #[test]
    fn from_json_parses_known_methods() {
        let request = WalletRequest::from_json(&json!({
            "method": "getBitcoinAddressAndKey",
            "env": "DEV",
            "mnemonic": TEST_PHRASE,
        }))
        .unwrap();
        assert!(matches!(
            request,
            WalletRequest::GetBitcoinAddressAndKey { .. }
        ));
    }

    #[test]
    fn from_json_missing_field_maps_to_method_code() {
        let err = WalletRequest::from_json(&json!({
            "method": "getBitcoinAddressAndKey",
            "mnemonic": TEST_PHRASE,
        }))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::GetBitcoinAddressAndKeyError);
        assert!(err.message.contains("missing or invalid arguments"));

        let err = WalletRequest::from_json(&json!({ "method": "importWallet" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportWalletError);
    }

    #[test]
    fn from_json_unknown_method() {
        let err = WalletRequest::from_json(&json!({ "method": "signTransaction" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::MethodNotImplemented);
    }

    #[test]
    fn response_serializes_with_camel_case_keys() {
        let response = WalletResponse::BitcoinAddressAndKey {
            bitcoin_address: "bc1qexample".into(),
            bitcoin_key: "00".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["bitcoinAddress"], "bc1qexample");
        assert_eq!(json["bitcoinKey"], "00");
    }

    #[test]
    fn debug_redacts_secrets() {
        let request = WalletRequest::ImportWallet {
            mnemonic: TEST_PHRASE.into(),
        };
        assert!(!format!("{request:?}").contains("abandon"));

        let response = WalletResponse::Mnemonic(TEST_PHRASE.into());
        assert!(!format!("{response:?}").contains("abandon"));
    }
}
