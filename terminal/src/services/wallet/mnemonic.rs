//! # Mnemonic Wallets
//!
//! BIP-39 phrase generation and import, with SLIP-0010 ed25519 derivation
//! at the standard Solana account path `m/44'/501'/0'/0'`. The phrase is
//! the only backup: the same phrase always derives the same keypair.

use bip39::Mnemonic;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha512;
use solana_sdk::signature::{Keypair, Signer};
use zeroize::Zeroize;

use super::WalletError;

type HmacSha512 = Hmac<Sha512>;

/// Hardened indices for `m/44'/501'/0'/0'`.
const SOLANA_PATH: [u32; 4] = [44, 501, 0, 0];

/// A wallet derived from a BIP-39 phrase.
pub struct MnemonicWallet {
    mnemonic: Mnemonic,
    keypair: Keypair,
}

impl MnemonicWallet {
    /// Generate a fresh wallet. `word_count` must be 12 or 24.
    pub fn generate(word_count: usize) -> Result<Self, WalletError> {
        let entropy_len = match word_count {
            12 => 16,
            24 => 32,
            n => {
                return Err(WalletError::Mnemonic(format!(
                    "Unsupported word count {} (use 12 or 24)",
                    n
                )))
            }
        };

        let mut entropy = [0u8; 32];
        rand::rng().fill_bytes(&mut entropy[..entropy_len]);

        let mnemonic = Mnemonic::from_entropy(&entropy[..entropy_len])
            .map_err(|e| WalletError::Mnemonic(e.to_string()))?;
        entropy.zeroize();

        Self::from_mnemonic(mnemonic)
    }

    /// Import a wallet from an existing phrase. Word order, spelling and
    /// the checksum word are all validated.
    pub fn import(phrase: &str) -> Result<Self, WalletError> {
        let mnemonic =
            Mnemonic::parse(phrase.trim()).map_err(|e| WalletError::Mnemonic(e.to_string()))?;
        Self::from_mnemonic(mnemonic)
    }

    fn from_mnemonic(mnemonic: Mnemonic) -> Result<Self, WalletError> {
        let mut seed = mnemonic.to_seed("");
        let keypair = derive_solana_keypair(&seed)?;
        seed.zeroize();

        Ok(Self { mnemonic, keypair })
    }

    /// The backup phrase. Display once, never log.
    pub fn phrase(&self) -> String {
        self.mnemonic.to_string()
    }

    pub fn word_count(&self) -> usize {
        self.mnemonic.word_count()
    }

    /// Base58 public key of the derived account.
    pub fn public_key(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

/// SLIP-0010 ed25519 derivation of the account key at `m/44'/501'/0'/0'`.
fn derive_solana_keypair(seed: &[u8]) -> Result<Keypair, WalletError> {
    let (mut key, mut chain) = hmac_split(b"ed25519 seed", seed)?;

    // ed25519 supports hardened derivation only.
    for index in SOLANA_PATH {
        let hardened = 0x8000_0000u32 | index;

        let mut data = [0u8; 37];
        data[1..33].copy_from_slice(&key);
        data[33..].copy_from_slice(&hardened.to_be_bytes());

        let (child_key, child_chain) = hmac_split(&chain, &data)?;
        data.zeroize();
        key.zeroize();

        key = child_key;
        chain = child_chain;
    }
    chain.zeroize();

    let keypair = Keypair::new_from_array(key);
    key.zeroize();
    Ok(keypair)
}

fn hmac_split(key: &[u8], data: &[u8]) -> Result<([u8; 32], [u8; 32]), WalletError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::Derivation(e.to_string()))?;
    mac.update(data);
    let digest = mac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&digest[..32]);
    right.copy_from_slice(&digest[32..]);
    Ok((left, right))
}
