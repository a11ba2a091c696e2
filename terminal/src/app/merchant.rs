//! # Merchant Hierarchy Controller
//!
//! CRUD and navigation over the 4-level tree Network → {Market, Menu};
//! Market → Table. One controller owns the fetched lists and a view stack;
//! only the top of the stack is the visible view.
//!
//! Auth policy: reads degrade silently to an empty list when no wallet
//! session exists; mutations fail fast with [`AppError::AuthRequired`]
//! before any network call. List refreshes are all-or-nothing — a failed
//! fetch leaves the prior list untouched. Creation never inserts locally;
//! the list is re-fetched so server-assigned ids and timestamps are
//! authoritative.

use std::sync::Arc;

use shared::dto::auth::AuthBody;
use shared::dto::merchant::{
    CreateMarketRequest, CreateMenuRequest, CreateNetworkRequest, CreateTableRequest, EntityType,
    Market, Menu, Network, Table,
};

use crate::core::service::MerchantApi;
use crate::core::{AppError, Result};
use crate::storage::AuthStore;
use crate::utils::validation;

/// Deepest allowed view stack: Network → Market → Table plus one detail.
const MAX_STACK_DEPTH: usize = 4;

/// A visible view in the hierarchy. The network list is the implicit root
/// below the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityView {
    /// Root list of networks.
    Networks,
    /// One network's markets and menus.
    Network { network_id: i64 },
    /// One market's tables.
    Market { market_id: i64 },
    /// Menu detail.
    Menu { menu_id: i64 },
    /// Table detail.
    Table { table_id: i64 },
}

/// A pushed navigation entry with its display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub view: EntityView,
    pub title: String,
}

/// What to do with the view stack after a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Pop one level (deleting the entity currently viewed).
    GoBack,
    /// Return to the root network list.
    ClearStack,
}

pub struct MerchantController {
    api: Arc<dyn MerchantApi>,
    auth: AuthStore,
    stack: Vec<ViewEntry>,
    networks: Vec<Network>,
    markets: Vec<Market>,
    menus: Vec<Menu>,
    tables: Vec<Table>,
}

impl MerchantController {
    pub fn new(api: Arc<dyn MerchantApi>, auth: AuthStore) -> Self {
        Self {
            api,
            auth,
            stack: Vec::new(),
            networks: Vec::new(),
            markets: Vec::new(),
            menus: Vec::new(),
            tables: Vec::new(),
        }
    }

    // --- view stack ---

    /// The visible view: top of the stack, or the root network list.
    pub fn current_view(&self) -> EntityView {
        self.stack
            .last()
            .map(|entry| entry.view)
            .unwrap_or(EntityView::Networks)
    }

    pub fn current_title(&self) -> &str {
        self.stack
            .last()
            .map(|entry| entry.title.as_str())
            .unwrap_or("Networks")
    }

    pub fn stack(&self) -> &[ViewEntry] {
        &self.stack
    }

    /// Pop one view. Returns the now-visible view.
    pub fn go_back(&mut self) -> EntityView {
        self.stack.pop();
        self.current_view()
    }

    /// Close everything, back to the root network list.
    pub fn close_all(&mut self) {
        self.stack.clear();
    }

    fn push_view(&mut self, view: EntityView, title: String) -> Result<()> {
        if self.stack.len() >= MAX_STACK_DEPTH {
            return Err(AppError::validation("Navigation depth exceeded"));
        }
        self.stack.push(ViewEntry { view, title });
        Ok(())
    }

    // --- lists ---

    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    // --- reads (silent when unauthenticated) ---

    /// Fetch the network list. Without a wallet session the list renders
    /// empty and no request is made.
    #[tracing::instrument(skip(self))]
    pub async fn load_networks(&mut self) -> Result<()> {
        let Some(auth) = self.auth.auth_body() else {
            self.networks.clear();
            return Ok(());
        };
        self.networks = self.api.list_networks(&auth).await?;
        Ok(())
    }

    /// Open a network: push its view and load markets and menus.
    ///
    /// On fetch failure the pushed view is rolled back and the prior lists
    /// stay untouched.
    pub async fn open_network(&mut self, network_id: i64) -> Result<()> {
        let title = self
            .networks
            .iter()
            .find(|n| n.id == network_id)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| format!("Network {}", network_id));
        self.push_view(EntityView::Network { network_id }, title)?;

        let Some(auth) = self.auth.auth_body() else {
            self.markets.clear();
            self.menus.clear();
            return Ok(());
        };

        let markets = self.api.list_markets(&auth, network_id).await;
        let menus = self.api.list_menus(&auth, network_id).await;
        match (markets, menus) {
            (Ok(markets), Ok(menus)) => {
                self.markets = markets;
                self.menus = menus;
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                self.stack.pop();
                Err(e.into())
            }
        }
    }

    /// Open a market: push its view and load tables.
    pub async fn open_market(&mut self, market_id: i64) -> Result<()> {
        let title = self
            .markets
            .iter()
            .find(|m| m.id == market_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| format!("Market {}", market_id));
        self.push_view(EntityView::Market { market_id }, title)?;

        let Some(auth) = self.auth.auth_body() else {
            self.tables.clear();
            return Ok(());
        };

        match self.api.list_tables(&auth, market_id).await {
            Ok(tables) => {
                self.tables = tables;
                Ok(())
            }
            Err(e) => {
                self.stack.pop();
                Err(e.into())
            }
        }
    }

    /// Open a menu detail view. No fetch; menus carry no children.
    pub fn open_menu(&mut self, menu_id: i64) -> Result<()> {
        let title = self
            .menus
            .iter()
            .find(|m| m.id == menu_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| format!("Menu {}", menu_id));
        self.push_view(EntityView::Menu { menu_id }, title)
    }

    /// Open a table detail view.
    pub fn open_table(&mut self, table_id: i64) -> Result<()> {
        let title = self
            .tables
            .iter()
            .find(|t| t.id == table_id)
            .map(|t| format!("Table {}", t.number))
            .unwrap_or_else(|| format!("Table {}", table_id));
        self.push_view(EntityView::Table { table_id }, title)
    }

    // --- mutations (fail fast when unauthenticated) ---

    /// Create a network, then refresh the network list.
    #[tracing::instrument(skip(self, description))]
    pub async fn create_network(&mut self, name: &str, description: &str) -> Result<()> {
        let name = validation::validate_entity_name(name)?;
        let auth = self.require_auth()?;

        self.api
            .create_network(
                &auth,
                CreateNetworkRequest {
                    name,
                    description: description.trim().to_string(),
                },
            )
            .await?;
        self.load_networks().await
    }

    /// Create a market under a network, then refresh the market list.
    pub async fn create_market(&mut self, network_id: i64, name: &str) -> Result<()> {
        let name = validation::validate_entity_name(name)?;
        let auth = self.require_auth()?;

        self.api
            .create_market(
                &auth,
                CreateMarketRequest {
                    market_network_id: network_id,
                    name,
                },
            )
            .await?;
        self.markets = self.api.list_markets(&auth, network_id).await?;
        Ok(())
    }

    /// Create a menu under a network, then refresh the menu list.
    pub async fn create_menu(&mut self, network_id: i64, name: &str) -> Result<()> {
        let name = validation::validate_entity_name(name)?;
        let auth = self.require_auth()?;

        self.api
            .create_menu(
                &auth,
                CreateMenuRequest {
                    market_network_id: network_id,
                    name,
                },
            )
            .await?;
        self.menus = self.api.list_menus(&auth, network_id).await?;
        Ok(())
    }

    /// Create a table under a market, then refresh the table list. The
    /// server assigns the table number.
    pub async fn create_table(&mut self, market_id: i64) -> Result<()> {
        let auth = self.require_auth()?;

        self.api
            .create_table(&auth, CreateTableRequest { market_id })
            .await?;
        self.tables = self.api.list_tables(&auth, market_id).await?;
        Ok(())
    }

    /// Delete an entity. Callers confirm with the user beforehand.
    ///
    /// On success the supplied recovery is applied to the view stack and
    /// the now-visible list is re-fetched; on failure the view and lists
    /// are left unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn delete_entity(
        &mut self,
        entity: EntityType,
        id: i64,
        recovery: Recovery,
    ) -> Result<()> {
        let auth = self.require_auth()?;

        self.api.delete_entity(&auth, entity, id).await?;

        match recovery {
            Recovery::GoBack => {
                self.stack.pop();
            }
            Recovery::ClearStack => self.stack.clear(),
        }
        self.refresh_current().await
    }

    /// Re-fetch the lists backing the visible view.
    async fn refresh_current(&mut self) -> Result<()> {
        let Some(auth) = self.auth.auth_body() else {
            return Ok(());
        };

        match self.current_view() {
            EntityView::Networks => {
                self.networks = self.api.list_networks(&auth).await?;
            }
            EntityView::Network { network_id } => {
                self.markets = self.api.list_markets(&auth, network_id).await?;
                self.menus = self.api.list_menus(&auth, network_id).await?;
            }
            EntityView::Market { market_id } => {
                self.tables = self.api.list_tables(&auth, market_id).await?;
            }
            // Detail views carry no list.
            EntityView::Menu { .. } | EntityView::Table { .. } => {}
        }
        Ok(())
    }

    fn require_auth(&self) -> Result<AuthBody> {
        self.auth.auth_body().ok_or(AppError::AuthRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::services::api::ApiError;
    use crate::storage::SessionStore;

    #[derive(Default)]
    struct MockMerchantApi {
        calls: Mutex<Vec<String>>,
        networks: Mutex<Vec<Network>>,
        markets: Mutex<Vec<Market>>,
        tables: Mutex<Vec<Table>>,
        fail_lists: Mutex<bool>,
    }

    impl MockMerchantApi {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().push(call.into());
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        fn list_result<T: Clone>(&self, list: &Mutex<Vec<T>>) -> std::result::Result<Vec<T>, ApiError> {
            if *self.fail_lists.lock() {
                Err(ApiError::Network("connection reset".to_string()))
            } else {
                Ok(list.lock().clone())
            }
        }
    }

    #[async_trait]
    impl MerchantApi for MockMerchantApi {
        async fn create_network(
            &self,
            _auth: &AuthBody,
            request: CreateNetworkRequest,
        ) -> std::result::Result<(), ApiError> {
            self.record(format!("create_network:{}", request.name));
            let mut networks = self.networks.lock();
            let id = networks.len() as i64 + 1;
            networks.push(Network {
                id,
                name: request.name,
                description: request.description,
                created_at: "2026-01-01T00:00:00Z".to_string(),
            });
            Ok(())
        }

        async fn list_networks(
            &self,
            _auth: &AuthBody,
        ) -> std::result::Result<Vec<Network>, ApiError> {
            self.record("list_networks");
            self.list_result(&self.networks)
        }

        async fn create_market(
            &self,
            _auth: &AuthBody,
            request: CreateMarketRequest,
        ) -> std::result::Result<(), ApiError> {
            self.record(format!("create_market:{}", request.name));
            let mut markets = self.markets.lock();
            let id = markets.len() as i64 + 1;
            markets.push(Market {
                id,
                name: request.name,
                created_at: "2026-01-01T00:00:00Z".to_string(),
            });
            Ok(())
        }

        async fn list_markets(
            &self,
            _auth: &AuthBody,
            _network_id: i64,
        ) -> std::result::Result<Vec<Market>, ApiError> {
            self.record("list_markets");
            self.list_result(&self.markets)
        }

        async fn create_menu(
            &self,
            _auth: &AuthBody,
            _request: CreateMenuRequest,
        ) -> std::result::Result<(), ApiError> {
            self.record("create_menu");
            Ok(())
        }

        async fn list_menus(
            &self,
            _auth: &AuthBody,
            _network_id: i64,
        ) -> std::result::Result<Vec<Menu>, ApiError> {
            self.record("list_menus");
            if *self.fail_lists.lock() {
                Err(ApiError::Network("connection reset".to_string()))
            } else {
                Ok(Vec::new())
            }
        }

        async fn create_table(
            &self,
            _auth: &AuthBody,
            request: CreateTableRequest,
        ) -> std::result::Result<(), ApiError> {
            self.record(format!("create_table:{}", request.market_id));
            let mut tables = self.tables.lock();
            let number = tables.len() as i64 + 1;
            tables.push(Table {
                id: number,
                number,
                created_at: "2026-01-01T00:00:00Z".to_string(),
            });
            Ok(())
        }

        async fn list_tables(
            &self,
            _auth: &AuthBody,
            _market_id: i64,
        ) -> std::result::Result<Vec<Table>, ApiError> {
            self.record("list_tables");
            self.list_result(&self.tables)
        }

        async fn delete_entity(
            &self,
            _auth: &AuthBody,
            entity: EntityType,
            id: i64,
        ) -> std::result::Result<(), ApiError> {
            self.record(format!("delete:{}:{}", entity.path_segment(), id));
            self.networks.lock().retain(|n| n.id != id);
            Ok(())
        }
    }

    fn authed_controller(api: Arc<MockMerchantApi>) -> MerchantController {
        let auth = AuthStore::new(SessionStore::in_memory());
        auth.set_session("Addr1", "sess1");
        MerchantController::new(api, auth)
    }

    fn unauthed_controller(api: Arc<MockMerchantApi>) -> MerchantController {
        MerchantController::new(api, AuthStore::new(SessionStore::in_memory()))
    }

    #[tokio::test]
    async fn unauthenticated_read_is_silent_and_offline() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = unauthed_controller(api.clone());

        controller.load_networks().await.unwrap();
        assert!(controller.networks().is_empty());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn unauthenticated_mutation_fails_fast() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = unauthed_controller(api.clone());

        let result = controller.create_network("Downtown", "").await;
        assert!(matches!(result, Err(AppError::AuthRequired)));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn create_network_refreshes_by_refetching() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api.clone());

        controller
            .create_network("Downtown", "Food court")
            .await
            .unwrap();

        assert_eq!(controller.networks().len(), 1);
        assert_eq!(controller.networks()[0].name, "Downtown");
        assert_eq!(
            *api.calls.lock(),
            vec!["create_network:Downtown", "list_networks"]
        );
    }

    #[tokio::test]
    async fn empty_name_blocks_before_any_call() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api.clone());

        let result = controller.create_network("   ", "desc").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_prior_list() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api.clone());
        controller.create_network("Downtown", "").await.unwrap();
        assert_eq!(controller.networks().len(), 1);

        *api.fail_lists.lock() = true;
        assert!(controller.load_networks().await.is_err());
        assert_eq!(controller.networks().len(), 1);
    }

    #[tokio::test]
    async fn open_network_pushes_and_loads_children() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api.clone());
        controller.create_network("Downtown", "").await.unwrap();

        controller.open_network(1).await.unwrap();
        assert_eq!(
            controller.current_view(),
            EntityView::Network { network_id: 1 }
        );
        assert_eq!(controller.current_title(), "Downtown");

        assert_eq!(controller.go_back(), EntityView::Networks);
        assert!(controller.stack().is_empty());
    }

    #[tokio::test]
    async fn failed_open_rolls_back_navigation() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api.clone());
        controller.create_network("Downtown", "").await.unwrap();

        *api.fail_lists.lock() = true;
        assert!(controller.open_network(1).await.is_err());
        assert_eq!(controller.current_view(), EntityView::Networks);
    }

    #[tokio::test]
    async fn stack_depth_is_bounded() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api);

        controller.open_network(1).await.unwrap();
        controller.open_market(1).await.unwrap();
        controller.open_table(1).unwrap();
        // One spare level remains, then the bound applies.
        controller
            .push_view(EntityView::Table { table_id: 2 }, "x".to_string())
            .unwrap();
        assert!(matches!(
            controller.push_view(EntityView::Table { table_id: 3 }, "y".to_string()),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn close_all_returns_to_root() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api);
        controller.open_network(1).await.unwrap();
        controller.open_market(1).await.unwrap();

        controller.close_all();
        assert_eq!(controller.current_view(), EntityView::Networks);
    }

    #[tokio::test]
    async fn delete_applies_recovery_and_refreshes() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api.clone());
        controller.create_network("Downtown", "").await.unwrap();
        controller.open_network(1).await.unwrap();

        controller
            .delete_entity(EntityType::Network, 1, Recovery::GoBack)
            .await
            .unwrap();

        assert_eq!(controller.current_view(), EntityView::Networks);
        assert!(controller.networks().is_empty());
        assert!(api
            .calls
            .lock()
            .iter()
            .any(|c| c == "delete:networks:1"));
    }

    #[tokio::test]
    async fn create_table_gets_server_assigned_number() {
        let api = Arc::new(MockMerchantApi::default());
        let mut controller = authed_controller(api);

        controller.create_table(1).await.unwrap();
        controller.create_table(1).await.unwrap();

        let numbers: Vec<i64> = controller.tables().iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
