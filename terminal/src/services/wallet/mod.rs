//! # Wallet Services
//!
//! Solana wallet providers and key management.
//!
//! ## Modules
//! - [`provider`]: the [`provider::WalletProvider`] trait, the four known
//!   wallet brands, and the registry the connector enumerates
//! - [`local`]: file-backed provider implementation (keypair per brand)
//! - [`mnemonic`]: BIP-39 phrase generation/import with SLIP-0010 ed25519
//!   derivation at the standard Solana path

pub mod local;
pub mod mnemonic;
pub mod provider;

pub use local::LocalWalletProvider;
pub use mnemonic::MnemonicWallet;
pub use provider::{ConnectOpts, ProviderRegistry, WalletKind, WalletProvider};

use thiserror::Error;

/// Wallet provider and key-management errors.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The requested wallet brand has no key material on this machine.
    #[error("{0} wallet is not installed")]
    NotInstalled(String),

    /// The provider refused the connection (e.g. a silent reconnect was
    /// requested but the wallet is not trusted).
    #[error("Connection rejected: {0}")]
    ConnectionRejected(String),

    /// Failed to load a keypair from its backing file.
    #[error("Keypair load error: {0}")]
    KeypairLoad(String),

    /// Key bytes present but not a valid keypair.
    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),

    /// Invalid or unsupported mnemonic phrase.
    #[error("Invalid mnemonic: {0}")]
    Mnemonic(String),

    /// HD derivation failure.
    #[error("Derivation error: {0}")]
    Derivation(String),

    /// Operation requires a connected wallet.
    #[error("No wallet connected")]
    NotConnected,

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
