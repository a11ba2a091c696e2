//! # Local Wallet Provider
//!
//! File-backed [`WalletProvider`]: each wallet brand maps to one keypair
//! file under `<data_dir>/wallets/`. A brand is "installed" when its file
//! exists. Connecting loads the keypair; connecting to a missing brand
//! generates and persists a fresh keypair unless the caller asked for a
//! silent reconnect.
//!
//! Accepted key formats, matching the Solana CLI:
//! - JSON array of 64 bytes (secret || public) or 32 bytes (seed only)
//! - base58-encoded 32-byte seed

use std::path::PathBuf;

use parking_lot::RwLock;
use solana_sdk::signature::{Keypair, Signer};

use super::provider::{ConnectOpts, WalletKind, WalletProvider};
use super::WalletError;

pub struct LocalWalletProvider {
    kind: WalletKind,
    path: PathBuf,
    keypair: RwLock<Option<Keypair>>,
}

impl LocalWalletProvider {
    /// Provider for `kind` backed by `<data_dir>/wallets/<kind>.json`.
    pub fn new(kind: WalletKind, data_dir: &std::path::Path) -> Self {
        Self {
            kind,
            path: data_dir.join("wallets").join(format!("{}.json", kind.as_str())),
            keypair: RwLock::new(None),
        }
    }

    fn load_keypair(&self) -> Result<Keypair, WalletError> {
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| WalletError::KeypairLoad(format!("Failed to read file: {}", e)))?;

        keypair_from_str(&contents)
    }

    fn generate_keypair(&self) -> Result<Keypair, WalletError> {
        let keypair = Keypair::new();

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let bytes: Vec<u8> = keypair.to_bytes().to_vec();
        std::fs::write(&self.path, serde_json::to_string(&bytes).unwrap_or_default())?;

        tracing::info!(
            wallet = %self.kind,
            path = %self.path.display(),
            "Generated new wallet keypair"
        );
        Ok(keypair)
    }
}

/// Parse a keypair from the CLI file formats.
fn keypair_from_str(contents: &str) -> Result<Keypair, WalletError> {
    let trimmed = contents.trim();

    let bytes: Vec<u8> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)
            .map_err(|e| WalletError::InvalidKeypair(format!("Invalid JSON format: {}", e)))?
    } else {
        bs58::decode(trimmed)
            .into_vec()
            .map_err(|e| WalletError::InvalidKeypair(format!("Invalid base58: {}", e)))?
    };

    // 64-byte files are secret || public; only the first 32 bytes seed the key.
    let seed: &[u8] = match bytes.len() {
        32 | 64 => &bytes[..32],
        n => {
            return Err(WalletError::InvalidKeypair(format!(
                "Expected 32 or 64 bytes, got {}",
                n
            )))
        }
    };

    let mut arr = [0u8; 32];
    arr.copy_from_slice(seed);
    Ok(Keypair::new_from_array(arr))
}

#[async_trait::async_trait]
impl WalletProvider for LocalWalletProvider {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn is_installed(&self) -> bool {
        self.path.exists()
    }

    async fn connect(&self, opts: ConnectOpts) -> Result<String, WalletError> {
        let keypair = if self.path.exists() {
            self.load_keypair()?
        } else if opts.only_if_trusted {
            return Err(WalletError::ConnectionRejected(format!(
                "{} has no stored keypair",
                self.kind
            )));
        } else {
            self.generate_keypair()?
        };

        let pubkey = keypair.pubkey().to_string();
        *self.keypair.write() = Some(keypair);
        Ok(pubkey)
    }

    async fn disconnect(&self) {
        *self.keypair.write() = None;
    }
}
