//! Merchant hierarchy entities and requests.
//!
//! The hierarchy is a 4-level tree: a market network owns markets and menus,
//! a market owns tables. Parent references are server-enforced; the client
//! never validates them locally.

use serde::{Deserialize, Serialize};

/// Common response envelope for merchant endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Extract the error message, falling back to a generic one.
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "API Error".to_string())
    }
}

/// A market network: the root of the merchant hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
}

/// A market inside a network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// A menu inside a network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// A table inside a market. `number` is a display ordinal assigned by the
/// server; it is not unique across markets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: i64,
    pub number: i64,
    pub created_at: String,
}

/// Entity kind, used to build DELETE paths (`/merchant/{type}s/{id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Network,
    Market,
    Menu,
    Table,
}

impl EntityType {
    /// Plural path segment for REST routes.
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityType::Network => "networks",
            EntityType::Market => "markets",
            EntityType::Menu => "menus",
            EntityType::Table => "tables",
        }
    }
}

/// Create-network request body (auth fields are merged in by the client).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateNetworkRequest {
    pub name: String,
    pub description: String,
}

/// Create-market request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarketRequest {
    pub market_network_id: i64,
    pub name: String,
}

/// Create-menu request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    pub market_network_id: i64,
    pub name: String,
}

/// Create-table request body. The server assigns the table number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub market_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_round_trip() {
        let json = r#"{"id":1,"name":"Downtown","description":"Food court","createdAt":"2024-01-01T00:00:00Z"}"#;
        let network: Network = serde_json::from_str(json).unwrap();
        assert_eq!(network.name, "Downtown");
        assert_eq!(serde_json::to_string(&network).unwrap(), json);
    }

    #[test]
    fn network_description_defaults_to_empty() {
        let json = r#"{"id":1,"name":"Downtown","createdAt":"2024-01-01T00:00:00Z"}"#;
        let network: Network = serde_json::from_str(json).unwrap();
        assert!(network.description.is_empty());
    }

    #[test]
    fn entity_type_path_segments() {
        assert_eq!(EntityType::Network.path_segment(), "networks");
        assert_eq!(EntityType::Market.path_segment(), "markets");
        assert_eq!(EntityType::Menu.path_segment(), "menus");
        assert_eq!(EntityType::Table.path_segment(), "tables");
    }

    #[test]
    fn create_market_uses_market_network_id() {
        let req = CreateMarketRequest {
            market_network_id: 7,
            name: "Stalls".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"marketNetworkId":7,"name":"Stalls"}"#);
    }

    #[test]
    fn api_response_error_message_fallback() {
        let resp: ApiResponse<Vec<Network>> =
            serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(resp.error_message(), "API Error");

        let resp: ApiResponse<Vec<Network>> =
            serde_json::from_str(r#"{"success":false,"error":"session expired"}"#).unwrap();
        assert_eq!(resp.error_message(), "session expired");
    }
}
