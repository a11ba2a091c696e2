//! # Transaction History Endpoints
//!
//! Paginated history fetches plus the mock-seeding dev helper.

use reqwest::Method;
use shared::dto::transaction::{MockTransactionsRequest, TransactionPage};

use super::client::ApiClient;
use super::ApiError;

/// Fetch one page of transaction history. `page` is 1-based.
///
/// Page fetches carry their own, longer timeout so a slow page does not
/// fail as quickly as ordinary calls; the feed decides whether a timeout
/// is a full-page error (page 1) or an inline retry (later pages).
#[tracing::instrument(skip(client), fields(wallet = %shared::utils::truncate_address(wallet), page, limit))]
pub async fn list_transactions(
    client: &ApiClient,
    wallet: &str,
    page: u32,
    limit: u32,
) -> Result<TransactionPage, ApiError> {
    let path = format!(
        "/transaction/list?wallet={}&page={}&limit={}",
        urlencoding::encode(wallet),
        page,
        limit
    );

    let response: TransactionPage = client
        .execute_json(
            client
                .request(Method::GET, &path)
                .timeout(client.feed_timeout),
        )
        .await?;

    if response.success {
        Ok(response)
    } else {
        Err(ApiError::Server("Failed to fetch transactions".to_string()))
    }
}

/// Ask the server to seed mock transactions for a wallet.
///
/// Best-effort: callers typically log and ignore the error.
pub async fn seed_mock_transactions(client: &ApiClient, wallet: &str) -> Result<(), ApiError> {
    let request = MockTransactionsRequest {
        wallet: wallet.to_string(),
    };

    let _: serde_json::Value = client
        .execute_json(client.request(Method::POST, "/transaction/mock").json(&request))
        .await?;

    Ok(())
}
