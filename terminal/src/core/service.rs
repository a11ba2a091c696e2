//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! Each trait covers one domain of the remote merchant API. The concrete
//! [`crate::services::api::ApiClient`] implements all of them; controller
//! tests substitute mocks. The wallet counterpart lives in
//! [`crate::services::wallet::WalletProvider`] next to its adapters.

use async_trait::async_trait;
use shared::dto::auth::{AuthBody, AuthResponse};
use shared::dto::merchant::{
    CreateMarketRequest, CreateMenuRequest, CreateNetworkRequest, CreateTableRequest, EntityType,
    Market, Menu, Network, Table,
};
use shared::dto::payment::{CreatePaymentRequest, PaymentCreated};
use shared::dto::transaction::TransactionPage;

use crate::services::api::ApiError;

/// Wallet-session authentication operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange a wallet address for a server-issued session key.
    async fn login(&self, wallet_address: &str) -> Result<AuthResponse, ApiError>;

    /// Check whether a persisted session is still accepted by the server.
    async fn validate_session(&self, auth: &AuthBody) -> Result<bool, ApiError>;

    /// Notify the server of a logout. Best-effort; callers may ignore errors.
    async fn logout(&self, wallet_address: &str) -> Result<(), ApiError>;
}

/// CRUD over the market-network hierarchy. Every call embeds the wallet
/// session in the request body for server-side authorization.
#[async_trait]
pub trait MerchantApi: Send + Sync {
    async fn create_network(
        &self,
        auth: &AuthBody,
        request: CreateNetworkRequest,
    ) -> Result<(), ApiError>;

    async fn list_networks(&self, auth: &AuthBody) -> Result<Vec<Network>, ApiError>;

    async fn create_market(
        &self,
        auth: &AuthBody,
        request: CreateMarketRequest,
    ) -> Result<(), ApiError>;

    async fn list_markets(&self, auth: &AuthBody, network_id: i64) -> Result<Vec<Market>, ApiError>;

    async fn create_menu(
        &self,
        auth: &AuthBody,
        request: CreateMenuRequest,
    ) -> Result<(), ApiError>;

    async fn list_menus(&self, auth: &AuthBody, network_id: i64) -> Result<Vec<Menu>, ApiError>;

    async fn create_table(
        &self,
        auth: &AuthBody,
        request: CreateTableRequest,
    ) -> Result<(), ApiError>;

    async fn list_tables(&self, auth: &AuthBody, market_id: i64) -> Result<Vec<Table>, ApiError>;

    /// Delete an entity by kind and id. The server cascades to children.
    async fn delete_entity(
        &self,
        auth: &AuthBody,
        entity: EntityType,
        id: i64,
    ) -> Result<(), ApiError>;
}

/// Paginated transaction history.
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// Fetch one page of history for a wallet. `page` is 1-based.
    async fn list_transactions(
        &self,
        wallet: &str,
        page: u32,
        limit: u32,
    ) -> Result<TransactionPage, ApiError>;

    /// Ask the server to seed mock transactions for a wallet (dev helper).
    /// Best-effort; callers may ignore errors.
    async fn seed_mock_transactions(&self, wallet: &str) -> Result<(), ApiError>;
}

/// Server-side payment creation.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    /// Create a payment and return the server-rendered QR reference.
    /// Bounded by the configured payment timeout.
    async fn create_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<PaymentCreated, ApiError>;

    /// Quick reachability probe, used only to decorate the UI.
    async fn probe_server(&self) -> bool;
}
