//! # Payment Endpoints
//!
//! Server-side payment creation, bounded by a short timeout so the caller
//! can fall back to local QR generation when the payment server is down.

use reqwest::Method;
use shared::dto::merchant::ApiResponse;
use shared::dto::payment::{CreatePaymentRequest, PaymentCreated};

use super::client::ApiClient;
use super::ApiError;

/// Create a payment and return the server-rendered QR reference.
#[tracing::instrument(skip(client, request), fields(amount = request.amount, token = %request.token))]
pub async fn create_payment(
    client: &ApiClient,
    request: &CreatePaymentRequest,
) -> Result<PaymentCreated, ApiError> {
    tracing::info!("Attempting server QR generation");

    let response: ApiResponse<PaymentCreated> = client
        .execute_json(
            client
                .request(Method::POST, "/payment/create")
                .timeout(client.payment_timeout)
                .json(request),
        )
        .await?;

    match response {
        ApiResponse {
            success: true,
            data: Some(created),
            ..
        } if !created.qr_code.is_empty() => {
            tracing::info!(payment_id = ?created.id, "Server QR created");
            Ok(created)
        }
        other => {
            tracing::warn!(error = %other.error_message(), "Invalid payment response");
            Err(ApiError::Server(other.error_message()))
        }
    }
}

/// Quick reachability probe against the API root. Decorative only: connect
/// attempts are never gated on it.
pub async fn probe_server(client: &ApiClient) -> bool {
    let url = client.base_url().trim_end_matches("/api").to_string();

    match client
        .http
        .get(&url)
        .timeout(std::time::Duration::from_secs(3))
        .send()
        .await
    {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}
