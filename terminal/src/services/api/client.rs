//! # API Client
//!
//! Main HTTP client for merchant API communication.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::core::config::AppConfig;
use crate::storage::{keys, SessionStore, StorageScope};

use super::ApiError;

/// HTTP client for communicating with the merchant API server.
///
/// Maintains a connection pool, the base URL from configuration, and the
/// session-scoped bearer token. The default 10 second timeout prevents UI
/// freezes; individual endpoints may override it (payment creation,
/// history pages).
pub struct ApiClient {
    pub(crate) http: Client,
    base_url: String,
    pub(crate) payment_timeout: Duration,
    pub(crate) feed_timeout: Duration,
    store: SessionStore,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new API client from configuration.
    pub fn new(config: &AppConfig, store: SessionStore) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        // Pick up a token left over from an earlier login in this process.
        let token = store.get(StorageScope::Session, keys::AUTH_TOKEN);

        Self {
            http,
            base_url: config.api_base_url.clone(),
            payment_timeout: config.payment_timeout,
            feed_timeout: config.feed_timeout,
            store,
            token: RwLock::new(token),
        }
    }

    /// Base URL for API requests (includes the `/api` prefix).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store the bearer token (session scope, dies with the process).
    pub fn set_token(&self, token: &str) {
        self.store
            .set(StorageScope::Session, keys::AUTH_TOKEN, token);
        *self.token.write() = Some(token.to_string());
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Drop the bearer token from memory and session storage.
    pub fn clear_token(&self) {
        self.store.remove(StorageScope::Session, keys::AUTH_TOKEN);
        *self.token.write() = None;
    }

    /// Build a request for `path` (relative to the base URL) with the JSON
    /// content type and, when a token is set, the authorization header.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        if let Some(token) = self.token() {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        builder
    }

    /// Send a request and parse the JSON body.
    ///
    /// Non-success HTTP statuses are mapped to [`ApiError::Server`] with the
    /// server-supplied `error` message when the body carries one, or a
    /// generic fallback otherwise.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()))
        } else {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("error")?.as_str().map(str::to_string))
                .unwrap_or_else(|| format!("API Error ({})", status));
            Err(ApiError::Server(message))
        }
    }
}

// The service traits are implemented by delegating to the endpoint modules,
// keeping this file free of wire details.

#[async_trait::async_trait]
impl crate::core::service::AuthApi for ApiClient {
    async fn login(
        &self,
        wallet_address: &str,
    ) -> Result<shared::dto::auth::AuthResponse, ApiError> {
        super::auth::login(self, wallet_address).await
    }

    async fn validate_session(
        &self,
        auth: &shared::dto::auth::AuthBody,
    ) -> Result<bool, ApiError> {
        super::auth::validate_session(self, auth).await
    }

    async fn logout(&self, wallet_address: &str) -> Result<(), ApiError> {
        super::auth::logout(self, wallet_address).await
    }
}

#[async_trait::async_trait]
impl crate::core::service::MerchantApi for ApiClient {
    async fn create_network(
        &self,
        auth: &shared::dto::auth::AuthBody,
        request: shared::dto::merchant::CreateNetworkRequest,
    ) -> Result<(), ApiError> {
        super::merchant::create_network(self, auth, request).await
    }

    async fn list_networks(
        &self,
        auth: &shared::dto::auth::AuthBody,
    ) -> Result<Vec<shared::dto::merchant::Network>, ApiError> {
        super::merchant::list_networks(self, auth).await
    }

    async fn create_market(
        &self,
        auth: &shared::dto::auth::AuthBody,
        request: shared::dto::merchant::CreateMarketRequest,
    ) -> Result<(), ApiError> {
        super::merchant::create_market(self, auth, request).await
    }

    async fn list_markets(
        &self,
        auth: &shared::dto::auth::AuthBody,
        network_id: i64,
    ) -> Result<Vec<shared::dto::merchant::Market>, ApiError> {
        super::merchant::list_markets(self, auth, network_id).await
    }

    async fn create_menu(
        &self,
        auth: &shared::dto::auth::AuthBody,
        request: shared::dto::merchant::CreateMenuRequest,
    ) -> Result<(), ApiError> {
        super::merchant::create_menu(self, auth, request).await
    }

    async fn list_menus(
        &self,
        auth: &shared::dto::auth::AuthBody,
        network_id: i64,
    ) -> Result<Vec<shared::dto::merchant::Menu>, ApiError> {
        super::merchant::list_menus(self, auth, network_id).await
    }

    async fn create_table(
        &self,
        auth: &shared::dto::auth::AuthBody,
        request: shared::dto::merchant::CreateTableRequest,
    ) -> Result<(), ApiError> {
        super::merchant::create_table(self, auth, request).await
    }

    async fn list_tables(
        &self,
        auth: &shared::dto::auth::AuthBody,
        market_id: i64,
    ) -> Result<Vec<shared::dto::merchant::Table>, ApiError> {
        super::merchant::list_tables(self, auth, market_id).await
    }

    async fn delete_entity(
        &self,
        auth: &shared::dto::auth::AuthBody,
        entity: shared::dto::merchant::EntityType,
        id: i64,
    ) -> Result<(), ApiError> {
        super::merchant::delete_entity(self, auth, entity, id).await
    }
}

#[async_trait::async_trait]
impl crate::core::service::TransactionApi for ApiClient {
    async fn list_transactions(
        &self,
        wallet: &str,
        page: u32,
        limit: u32,
    ) -> Result<shared::dto::transaction::TransactionPage, ApiError> {
        super::transaction::list_transactions(self, wallet, page, limit).await
    }

    async fn seed_mock_transactions(&self, wallet: &str) -> Result<(), ApiError> {
        super::transaction::seed_mock_transactions(self, wallet).await
    }
}

#[async_trait::async_trait]
impl crate::core::service::PaymentApi for ApiClient {
    async fn create_payment(
        &self,
        request: &shared::dto::payment::CreatePaymentRequest,
    ) -> Result<shared::dto::payment::PaymentCreated, ApiError> {
        super::payment::create_payment(self, request).await
    }

    async fn probe_server(&self) -> bool {
        super::payment::probe_server(self).await
    }
}
