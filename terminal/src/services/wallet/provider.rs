//! # Wallet Providers
//!
//! The provider abstraction the connector drives. Each known wallet brand
//! gets one provider; the registry answers "which wallets are available
//! here" and hands out the provider for a brand.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;

use super::WalletError;

/// The wallet brands the terminal knows how to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletKind {
    Phantom,
    Solflare,
    Glow,
    Backpack,
}

impl WalletKind {
    /// Stable identifier used in storage and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "phantom",
            WalletKind::Solflare => "solflare",
            WalletKind::Glow => "glow",
            WalletKind::Backpack => "backpack",
        }
    }

    /// Human-facing name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "Phantom",
            WalletKind::Solflare => "Solflare",
            WalletKind::Glow => "Glow",
            WalletKind::Backpack => "Backpack",
        }
    }

    /// All known brands, in display order.
    pub fn all() -> [WalletKind; 4] {
        [
            WalletKind::Phantom,
            WalletKind::Solflare,
            WalletKind::Glow,
            WalletKind::Backpack,
        ]
    }
}

impl FromStr for WalletKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phantom" => Ok(WalletKind::Phantom),
            "solflare" => Ok(WalletKind::Solflare),
            "glow" => Ok(WalletKind::Glow),
            "backpack" => Ok(WalletKind::Backpack),
            other => Err(WalletError::NotInstalled(other.to_string())),
        }
    }
}

impl std::fmt::Display for WalletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Connection options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectOpts {
    /// Silent reconnect: succeed only if the wallet already trusts us,
    /// never prompt or create key material.
    pub only_if_trusted: bool,
}

/// A connectable wallet. Implementations own their key material; the
/// connector only ever sees the base58 public key.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The brand this provider represents.
    fn kind(&self) -> WalletKind;

    /// Whether the wallet is usable on this machine.
    fn is_installed(&self) -> bool;

    /// Connect and return the wallet's base58 public key.
    async fn connect(&self, opts: ConnectOpts) -> Result<String, WalletError>;

    /// Drop the active connection. Never fails.
    async fn disconnect(&self);
}

/// Provider lookup by brand.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<WalletKind, Box<dyn WalletProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any previous one for the same brand.
    pub fn register(&mut self, provider: Box<dyn WalletProvider>) {
        self.providers.insert(provider.kind(), provider);
    }

    pub fn get(&self, kind: WalletKind) -> Option<&dyn WalletProvider> {
        self.providers.get(&kind).map(|p| p.as_ref())
    }

    /// Brands with a usable provider, in display order.
    pub fn installed(&self) -> Vec<WalletKind> {
        WalletKind::all()
            .into_iter()
            .filter(|kind| {
                self.providers
                    .get(kind)
                    .is_some_and(|p| p.is_installed())
            })
            .collect()
    }
}
