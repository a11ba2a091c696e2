//! # Merchant Hierarchy Endpoints
//!
//! CRUD over Network → {Market, Menu}; Market → Table. Every request body
//! embeds the wallet session (`walletAddress` + `sessionKey`) because the
//! server authorizes merchant calls from the body, not from headers.

use reqwest::Method;
use serde::Serialize;
use shared::dto::auth::AuthBody;
use shared::dto::merchant::{
    ApiResponse, CreateMarketRequest, CreateMenuRequest, CreateNetworkRequest, CreateTableRequest,
    EntityType, Market, Menu, Network, Table,
};

use super::client::ApiClient;
use super::ApiError;

/// Request body with the wallet session merged in.
#[derive(Serialize)]
struct Authed<'a, B: Serialize> {
    #[serde(flatten)]
    auth: &'a AuthBody,
    #[serde(flatten)]
    body: &'a B,
}

/// POST an authed body and unwrap the `{success, data, error}` envelope,
/// discarding the payload.
async fn post_unit<B: Serialize>(
    client: &ApiClient,
    path: &str,
    auth: &AuthBody,
    body: &B,
) -> Result<(), ApiError> {
    let response: ApiResponse<serde_json::Value> = client
        .execute_json(
            client
                .request(Method::POST, path)
                .json(&Authed { auth, body }),
        )
        .await?;

    if response.success {
        Ok(())
    } else {
        Err(ApiError::Server(response.error_message()))
    }
}

/// POST the wallet session alone and unwrap a list payload.
async fn post_list<T: serde::de::DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    auth: &AuthBody,
) -> Result<Vec<T>, ApiError> {
    let response: ApiResponse<Vec<T>> = client
        .execute_json(client.request(Method::POST, path).json(auth))
        .await?;

    if response.success {
        Ok(response.data.unwrap_or_default())
    } else {
        Err(ApiError::Server(response.error_message()))
    }
}

#[tracing::instrument(skip(client, auth, request), fields(name = %request.name))]
pub async fn create_network(
    client: &ApiClient,
    auth: &AuthBody,
    request: CreateNetworkRequest,
) -> Result<(), ApiError> {
    post_unit(client, "/merchant/networks", auth, &request).await
}

pub async fn list_networks(client: &ApiClient, auth: &AuthBody) -> Result<Vec<Network>, ApiError> {
    post_list(client, "/merchant/networks/list", auth).await
}

pub async fn create_market(
    client: &ApiClient,
    auth: &AuthBody,
    request: CreateMarketRequest,
) -> Result<(), ApiError> {
    post_unit(client, "/merchant/markets", auth, &request).await
}

pub async fn list_markets(
    client: &ApiClient,
    auth: &AuthBody,
    network_id: i64,
) -> Result<Vec<Market>, ApiError> {
    post_list(client, &format!("/merchant/markets/{}/list", network_id), auth).await
}

pub async fn create_menu(
    client: &ApiClient,
    auth: &AuthBody,
    request: CreateMenuRequest,
) -> Result<(), ApiError> {
    post_unit(client, "/merchant/menus", auth, &request).await
}

pub async fn list_menus(
    client: &ApiClient,
    auth: &AuthBody,
    network_id: i64,
) -> Result<Vec<Menu>, ApiError> {
    post_list(client, &format!("/merchant/menus/{}/list", network_id), auth).await
}

pub async fn create_table(
    client: &ApiClient,
    auth: &AuthBody,
    request: CreateTableRequest,
) -> Result<(), ApiError> {
    post_unit(client, "/merchant/tables", auth, &request).await
}

pub async fn list_tables(
    client: &ApiClient,
    auth: &AuthBody,
    market_id: i64,
) -> Result<Vec<Table>, ApiError> {
    post_list(client, &format!("/merchant/tables/{}/list", market_id), auth).await
}

/// Delete an entity. The server cascades the removal to its children.
#[tracing::instrument(skip(client, auth))]
pub async fn delete_entity(
    client: &ApiClient,
    auth: &AuthBody,
    entity: EntityType,
    id: i64,
) -> Result<(), ApiError> {
    let path = format!("/merchant/{}/{}", entity.path_segment(), id);

    let response: ApiResponse<serde_json::Value> = client
        .execute_json(client.request(Method::DELETE, &path).json(auth))
        .await?;

    if response.success {
        Ok(())
    } else {
        tracing::warn!(error = %response.error_message(), "Delete rejected by server");
        Err(ApiError::Server(response.error_message()))
    }
}
