//! # arbor-wallet — HD wallet facade.
//!
//! Composes the [`arbor_core`] pipeline into the three wallet operations:
//! create (entropy -> mnemonic), import (validate a mnemonic), and
//! derive-address-and-key (mnemonic -> seed -> key tree -> address).
//!
//! Every operation is a pure, stateless function; no wallet object
//! survives between calls and nothing is cached. The mnemonic is the only
//! durable artifact, and it belongs to the caller.
//!
//! # Modules
//!
//! - [`error`] — `WalletError` enum
//! - [`wallet`] — the three core operations
//! - [`boundary`] — typed request/response contract for host bridges

pub mod boundary;
pub mod error;
pub mod wallet;

// Re-exports for convenient access
pub use boundary::{BoundaryError, ErrorCode, WalletRequest, WalletResponse};
pub use error::WalletError;
pub use wallet::{AddressAndKey, create_wallet, derive_address_and_key, import_wallet};
