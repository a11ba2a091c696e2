//! # Wallet Connector
//!
//! Drives the wallet connection lifecycle and keeps the persisted session
//! in sync with the server:
//!
//! ```text
//! Disconnected -> Connecting -> Connected -> Disconnecting -> Disconnected
//!                     \                            ^
//!                      AutoReconnecting (startup) -+
//! ```
//!
//! Connect obtains the provider's public key, exchanges it for a session
//! key via login, and persists wallet type + address + session only after
//! both steps succeed. Disconnect is best-effort remotely but always
//! succeeds locally.

use std::sync::Arc;

use crate::core::service::AuthApi;
use crate::core::{AppError, Result};
use crate::services::api::ApiError;
use crate::services::wallet::{ConnectOpts, ProviderRegistry, WalletError, WalletKind};
use crate::storage::{keys, AuthStore, SessionStore, StorageScope};

/// Connection lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting(WalletKind),
    /// Startup revalidation of a persisted session.
    AutoReconnecting,
    Connected { kind: WalletKind, address: String },
    Disconnecting,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            ConnectionState::Connected { address, .. } => Some(address),
            _ => None,
        }
    }
}

pub struct WalletConnector {
    auth_api: Arc<dyn AuthApi>,
    registry: ProviderRegistry,
    store: SessionStore,
    auth: AuthStore,
    state: ConnectionState,
}

impl WalletConnector {
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        registry: ProviderRegistry,
        store: SessionStore,
        auth: AuthStore,
    ) -> Self {
        Self {
            auth_api,
            registry,
            store,
            auth,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Brands with a usable provider. Decorative: a connect attempt is
    /// never gated on this.
    pub fn installed_wallets(&self) -> Vec<WalletKind> {
        self.registry.installed()
    }

    /// Connect a wallet and establish a server session.
    ///
    /// Nothing is persisted until both the provider connect and the server
    /// login succeed; any failure leaves the connector `Disconnected` with
    /// no partial state.
    #[tracing::instrument(skip(self), fields(wallet = %kind))]
    pub async fn connect(&mut self, kind: WalletKind) -> Result<String> {
        self.state = ConnectionState::Connecting(kind);

        let Some(provider) = self.registry.get(kind) else {
            self.state = ConnectionState::Disconnected;
            return Err(AppError::Wallet(WalletError::NotInstalled(kind.to_string())));
        };

        let address = match provider.connect(ConnectOpts::default()).await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(error = %e, "Provider connect failed");
                self.state = ConnectionState::Disconnected;
                return Err(e.into());
            }
        };

        let response = match self.auth_api.login(&address).await {
            Ok(response) => response,
            Err(e) => {
                provider.disconnect().await;
                self.state = ConnectionState::Disconnected;
                return Err(e.into());
            }
        };

        let session_key = match response.session_key.filter(|k| !k.is_empty()) {
            Some(key) => key,
            None => {
                provider.disconnect().await;
                self.state = ConnectionState::Disconnected;
                let message = response
                    .message
                    .unwrap_or_else(|| "Login returned no session key".to_string());
                return Err(AppError::Api(ApiError::Server(message)));
            }
        };

        self.store
            .set(StorageScope::Persistent, keys::WALLET_TYPE, kind.as_str());
        self.auth.set_session(&address, &session_key);
        self.state = ConnectionState::Connected {
            kind,
            address: address.clone(),
        };

        tracing::info!(address = %shared::utils::truncate_address(&address), "Wallet connected");
        Ok(address)
    }

    /// Disconnect the wallet. Remote calls are best-effort; local state is
    /// purged unconditionally, so this always ends `Disconnected`.
    pub async fn disconnect(&mut self) {
        self.state = ConnectionState::Disconnecting;

        if let Some(address) = self.auth.get_session().address {
            if let Err(e) = self.auth_api.logout(&address).await {
                tracing::warn!(error = %e, "Logout request failed");
            }
        }

        if let Some(kind) = self.persisted_kind() {
            if let Some(provider) = self.registry.get(kind) {
                provider.disconnect().await;
            }
        }

        self.store.remove(StorageScope::Persistent, keys::WALLET_TYPE);
        self.auth.clear_session();
        self.state = ConnectionState::Disconnected;
        tracing::info!("Wallet disconnected");
    }

    /// Attempt a silent reconnect from persisted state at startup.
    ///
    /// Returns `true` when a valid session was restored. Any failure along
    /// the way purges the persisted state so the app never starts with a
    /// half-valid session.
    #[tracing::instrument(skip(self))]
    pub async fn auto_reconnect(&mut self) -> bool {
        let (Some(kind), Some(auth_body)) = (self.persisted_kind(), self.auth.auth_body()) else {
            return false;
        };

        self.state = ConnectionState::AutoReconnecting;

        let valid = match self.auth_api.validate_session(&auth_body).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(error = %e, "Session validation failed");
                false
            }
        };
        if !valid {
            tracing::info!("Persisted session rejected, purging");
            self.disconnect().await;
            return false;
        }

        let reconnected = match self.registry.get(kind) {
            Some(provider) => {
                provider
                    .connect(ConnectOpts {
                        only_if_trusted: true,
                    })
                    .await
            }
            None => Err(WalletError::NotInstalled(kind.to_string())),
        };

        match reconnected {
            Ok(address) if address == auth_body.wallet_address => {
                self.state = ConnectionState::Connected { kind, address };
                tracing::info!(wallet = %kind, "Session restored");
                true
            }
            Ok(other) => {
                tracing::warn!(
                    expected = %shared::utils::truncate_address(&auth_body.wallet_address),
                    got = %shared::utils::truncate_address(&other),
                    "Provider returned a different wallet, purging session"
                );
                self.disconnect().await;
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Silent reconnect failed, purging session");
                self.disconnect().await;
                false
            }
        }
    }

    fn persisted_kind(&self) -> Option<WalletKind> {
        self.store
            .get(StorageScope::Persistent, keys::WALLET_TYPE)?
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::dto::auth::{AuthBody, AuthResponse};
    use crate::services::wallet::WalletProvider;

    struct MockAuthApi {
        session_key: Option<String>,
        login_error: bool,
        validate_ok: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MockAuthApi {
        fn new(session_key: Option<&str>) -> Self {
            Self {
                session_key: session_key.map(str::to_string),
                login_error: false,
                validate_ok: true,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AuthApi for MockAuthApi {
        async fn login(&self, _wallet_address: &str) -> std::result::Result<AuthResponse, ApiError> {
            self.calls.lock().push("login");
            if self.login_error {
                return Err(ApiError::Network("connection refused".to_string()));
            }
            Ok(AuthResponse {
                success: self.session_key.is_some(),
                session_key: self.session_key.clone(),
                message: None,
            })
        }

        async fn validate_session(&self, _auth: &AuthBody) -> std::result::Result<bool, ApiError> {
            self.calls.lock().push("validate");
            Ok(self.validate_ok)
        }

        async fn logout(&self, _wallet_address: &str) -> std::result::Result<(), ApiError> {
            self.calls.lock().push("logout");
            Err(ApiError::Network("server down".to_string()))
        }
    }

    struct StubProvider {
        kind: WalletKind,
        address: &'static str,
        reject_untrusted: bool,
    }

    #[async_trait]
    impl WalletProvider for StubProvider {
        fn kind(&self) -> WalletKind {
            self.kind
        }

        fn is_installed(&self) -> bool {
            true
        }

        async fn connect(&self, opts: ConnectOpts) -> std::result::Result<String, WalletError> {
            if opts.only_if_trusted && self.reject_untrusted {
                return Err(WalletError::ConnectionRejected("not trusted".to_string()));
            }
            Ok(self.address.to_string())
        }

        async fn disconnect(&self) {}
    }

    fn connector(api: Arc<MockAuthApi>, provider: StubProvider) -> WalletConnector {
        let store = SessionStore::in_memory();
        let auth = AuthStore::new(store.clone());
        let mut registry = ProviderRegistry::new();
        registry.register(Box::new(provider));
        WalletConnector::new(api, registry, store, auth)
    }

    fn phantom(address: &'static str) -> StubProvider {
        StubProvider {
            kind: WalletKind::Phantom,
            address,
            reject_untrusted: false,
        }
    }

    #[tokio::test]
    async fn connect_persists_kind_and_session() {
        let api = Arc::new(MockAuthApi::new(Some("sess1")));
        let mut connector = connector(api, phantom("Addr1"));

        let address = connector.connect(WalletKind::Phantom).await.unwrap();
        assert_eq!(address, "Addr1");
        assert!(connector.state().is_connected());
        assert!(connector.auth.is_authenticated());
        assert_eq!(
            connector.store.get(StorageScope::Persistent, keys::WALLET_TYPE),
            Some("phantom".to_string())
        );
    }

    #[tokio::test]
    async fn connect_without_session_key_persists_nothing() {
        let api = Arc::new(MockAuthApi::new(None));
        let mut connector = connector(api, phantom("Addr1"));

        let result = connector.connect(WalletKind::Phantom).await;
        assert!(matches!(result, Err(AppError::Api(_))));
        assert_eq!(connector.state(), &ConnectionState::Disconnected);
        assert!(!connector.auth.is_authenticated());
        assert_eq!(
            connector.store.get(StorageScope::Persistent, keys::WALLET_TYPE),
            None
        );
    }

    #[tokio::test]
    async fn connect_unregistered_wallet_fails() {
        let api = Arc::new(MockAuthApi::new(Some("sess1")));
        let mut connector = connector(api.clone(), phantom("Addr1"));

        let result = connector.connect(WalletKind::Glow).await;
        assert!(matches!(result, Err(AppError::Wallet(_))));
        assert!(api.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn disconnect_purges_even_when_logout_fails() {
        let api = Arc::new(MockAuthApi::new(Some("sess1")));
        let mut connector = connector(api.clone(), phantom("Addr1"));
        connector.connect(WalletKind::Phantom).await.unwrap();

        connector.disconnect().await;
        assert_eq!(connector.state(), &ConnectionState::Disconnected);
        assert!(!connector.auth.is_authenticated());
        assert!(api.calls.lock().contains(&"logout"));
    }

    #[tokio::test]
    async fn auto_reconnect_restores_valid_session() {
        let api = Arc::new(MockAuthApi::new(Some("sess1")));
        let mut connector = connector(api, phantom("Addr1"));
        connector.store
            .set(StorageScope::Persistent, keys::WALLET_TYPE, "phantom");
        connector.auth.set_session("Addr1", "sess1");

        assert!(connector.auto_reconnect().await);
        assert_eq!(connector.state().address(), Some("Addr1"));
    }

    #[tokio::test]
    async fn auto_reconnect_purges_invalid_session() {
        let mut api = MockAuthApi::new(Some("sess1"));
        api.validate_ok = false;
        let mut connector = connector(Arc::new(api), phantom("Addr1"));
        connector.store
            .set(StorageScope::Persistent, keys::WALLET_TYPE, "phantom");
        connector.auth.set_session("Addr1", "stale");

        assert!(!connector.auto_reconnect().await);
        assert!(!connector.auth.is_authenticated());
        assert_eq!(
            connector.store.get(StorageScope::Persistent, keys::WALLET_TYPE),
            None
        );
    }

    #[tokio::test]
    async fn auto_reconnect_purges_on_untrusted_provider() {
        let api = Arc::new(MockAuthApi::new(Some("sess1")));
        let provider = StubProvider {
            kind: WalletKind::Phantom,
            address: "Addr1",
            reject_untrusted: true,
        };
        let mut connector = connector(api, provider);
        connector.store
            .set(StorageScope::Persistent, keys::WALLET_TYPE, "phantom");
        connector.auth.set_session("Addr1", "sess1");

        assert!(!connector.auto_reconnect().await);
        assert!(!connector.auth.is_authenticated());
    }

    #[tokio::test]
    async fn auto_reconnect_without_persisted_state_is_noop() {
        let api = Arc::new(MockAuthApi::new(Some("sess1")));
        let mut connector = connector(api.clone(), phantom("Addr1"));

        assert!(!connector.auto_reconnect().await);
        assert!(api.calls.lock().is_empty());
        assert_eq!(connector.state(), &ConnectionState::Disconnected);
    }
}
