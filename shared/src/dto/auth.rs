use serde::{Deserialize, Serialize};

/// Wallet login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub wallet_address: String,
}

/// Login response: the server issues an opaque session key on success.
///
/// Older server builds return the key under `token`, newer ones under
/// `sessionKey`; the alias accepts both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    #[serde(alias = "token", skip_serializing_if = "Option::is_none")]
    pub session_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Session validation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub wallet_address: String,
    pub session_key: String,
}

/// Session validation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub success: bool,
}

/// Logout request (best-effort; client clears local state regardless)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub wallet_address: String,
}

/// Error response body used by the API on non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Credentials embedded in the body of every merchant call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthBody {
    pub wallet_address: String,
    pub session_key: String,
}
