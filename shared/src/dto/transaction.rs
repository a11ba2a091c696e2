//! Transaction history records.
//!
//! Transactions are immutable, read-only records fetched from the server in
//! pages. The client never constructs them (mock seeding aside, which is a
//! server-side generator triggered by the client).

use serde::{Deserialize, Serialize};

/// Direction of a transaction relative to the viewing wallet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sent,
    Received,
}

/// A single transaction record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub wallet: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: f64,
    pub token: String,
    /// Counterparty address.
    pub address: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// One page of transaction history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub success: bool,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub has_more: bool,
}

/// Mock seeding request (development helper endpoint).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MockTransactionsRequest {
    pub wallet: String,
}
