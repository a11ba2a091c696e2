//! Payment-QR creation DTOs.

use serde::{Deserialize, Serialize};

/// Server-side payment creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub recipient: String,
    pub amount: f64,
    pub token: String,
    pub label: String,
    pub message: String,
}

/// Payment created by the server: a ready-made QR image reference
/// (typically a data URL) plus the payment id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentCreated {
    pub qr_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
