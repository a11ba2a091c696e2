//! # Authentication Endpoints
//!
//! Wallet-session login, validation and logout.

use reqwest::Method;
use shared::dto::auth::{AuthBody, AuthResponse, LoginRequest, LogoutRequest, ValidateRequest, ValidateResponse};

use super::client::ApiClient;
use super::ApiError;

/// Exchange a wallet address for a session key.
///
/// On success the session key is also installed as the client's bearer
/// token for subsequent requests.
#[tracing::instrument(skip(client), fields(wallet = %shared::utils::truncate_address(wallet_address)))]
pub async fn login(client: &ApiClient, wallet_address: &str) -> Result<AuthResponse, ApiError> {
    tracing::info!("Attempting wallet login");
    let start = std::time::Instant::now();

    let request = LoginRequest {
        wallet_address: wallet_address.to_string(),
    };

    let response: AuthResponse = client
        .execute_json(client.request(Method::POST, "/auth/login").json(&request))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Login failed");
            e
        })?;

    if let Some(key) = response.session_key.as_deref() {
        client.set_token(key);
        tracing::info!(duration_ms = start.elapsed().as_millis(), "Login successful");
    } else {
        tracing::warn!(
            duration_ms = start.elapsed().as_millis(),
            "Login response carried no session key"
        );
    }

    Ok(response)
}

/// Check whether a persisted session is still valid server-side.
pub async fn validate_session(client: &ApiClient, auth: &AuthBody) -> Result<bool, ApiError> {
    let request = ValidateRequest {
        wallet_address: auth.wallet_address.clone(),
        session_key: auth.session_key.clone(),
    };

    let response: ValidateResponse = client
        .execute_json(client.request(Method::POST, "/auth/validate").json(&request))
        .await?;

    Ok(response.success)
}

/// Notify the server of a logout and drop the bearer token.
///
/// The token is cleared even if the request fails; disconnection always
/// succeeds locally.
pub async fn logout(client: &ApiClient, wallet_address: &str) -> Result<(), ApiError> {
    let request = LogoutRequest {
        wallet_address: wallet_address.to_string(),
    };

    let result: Result<serde_json::Value, ApiError> = client
        .execute_json(client.request(Method::POST, "/auth/logout").json(&request))
        .await;

    client.clear_token();

    result.map(|_| ())
}
