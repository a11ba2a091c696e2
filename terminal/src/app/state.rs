//! # Application Root
//!
//! Owns the configuration, storage, API client and all controllers. No
//! module-level globals: state lives here for the lifetime of the process
//! and is reached only through the root object.

use std::sync::Arc;

use crate::app::connector::WalletConnector;
use crate::app::feed::TransactionFeed;
use crate::app::merchant::MerchantController;
use crate::app::payment::PaymentQrGenerator;
use crate::core::config::AppConfig;
use crate::core::Result;
use crate::services::api::ApiClient;
use crate::services::wallet::{
    LocalWalletProvider, MnemonicWallet, ProviderRegistry, WalletKind,
};
use crate::storage::{keys, AuthStore, SessionStore, StorageScope};

pub struct App {
    pub config: AppConfig,
    pub store: SessionStore,
    pub auth: AuthStore,
    pub api: Arc<ApiClient>,
    pub connector: WalletConnector,
    pub merchant: MerchantController,
    pub feed: TransactionFeed,
    pub payments: PaymentQrGenerator,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let store = SessionStore::open(&config.data_dir);
        let auth = AuthStore::new(store.clone());
        let api = Arc::new(ApiClient::new(&config, store.clone()));

        let mut registry = ProviderRegistry::new();
        for kind in WalletKind::all() {
            registry.register(Box::new(LocalWalletProvider::new(kind, &config.data_dir)));
        }

        let connector =
            WalletConnector::new(api.clone(), registry, store.clone(), auth.clone());
        let merchant = MerchantController::new(api.clone(), auth.clone());
        let feed = TransactionFeed::new(api.clone(), config.feed_page_size);
        let payments = PaymentQrGenerator::new(api.clone(), auth.clone());

        Self {
            config,
            store,
            auth,
            api,
            connector,
            merchant,
            feed,
            payments,
        }
    }

    /// Generate a fresh mnemonic wallet and remember its address as the
    /// connected wallet. The phrase is returned for one-time display.
    pub fn create_mnemonic_wallet(&self, word_count: usize) -> Result<MnemonicWallet> {
        let wallet = MnemonicWallet::generate(word_count)?;
        self.remember_wallet_address(&wallet);
        Ok(wallet)
    }

    /// Import a wallet from an existing phrase and remember its address.
    pub fn import_mnemonic_wallet(&self, phrase: &str) -> Result<MnemonicWallet> {
        let wallet = MnemonicWallet::import(phrase)?;
        self.remember_wallet_address(&wallet);
        Ok(wallet)
    }

    fn remember_wallet_address(&self, wallet: &MnemonicWallet) {
        self.store.set(
            StorageScope::Persistent,
            keys::WALLET_ADDRESS,
            &wallet.public_key(),
        );
        tracing::info!(
            address = %shared::utils::truncate_address(&wallet.public_key()),
            "Mnemonic wallet ready"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(tag: &str) -> App {
        let mut config = AppConfig::default();
        config.data_dir = std::env::temp_dir().join(format!(
            "cryptonow-app-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&config.data_dir);
        App::new(config)
    }

    #[test]
    fn imported_wallet_address_is_remembered() {
        let app = test_app("import");
        let phrase =
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

        let wallet = app.import_mnemonic_wallet(phrase).unwrap();
        assert_eq!(
            app.store
                .get(StorageScope::Persistent, keys::WALLET_ADDRESS),
            Some(wallet.public_key())
        );

        let _ = std::fs::remove_dir_all(&app.config.data_dir);
    }

    #[test]
    fn created_wallet_round_trips_through_its_phrase() {
        let app = test_app("create");

        let wallet = app.create_mnemonic_wallet(12).unwrap();
        let reimported = app.import_mnemonic_wallet(&wallet.phrase()).unwrap();
        assert_eq!(wallet.public_key(), reimported.public_key());

        let _ = std::fs::remove_dir_all(&app.config.data_dir);
    }
}
