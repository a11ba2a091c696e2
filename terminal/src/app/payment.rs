//! # Payment QR Generator
//!
//! Builds a payment QR for the connected wallet. Two mutually exclusive
//! paths per call:
//!
//! - **Server**: `POST /payment/create` returns a ready-made QR image
//!   reference. The server adds a processing fee.
//! - **Local**: on any server failure (timeout, non-OK, malformed payload)
//!   the payment URL is encoded locally and rendered as an SVG QR. No fee.
//!
//! The result carries its source so the UI can show the matching fee
//! notice and the user always knows which path produced the code.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use shared::dto::payment::CreatePaymentRequest;

use crate::core::service::PaymentApi;
use crate::core::{AppError, Result};
use crate::storage::AuthStore;
use crate::utils::validation;

/// SPL token mints by symbol. SOL is the native token and needs none.
static TOKEN_MINTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
        ("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB"),
    ])
});

/// Label shown in the paying wallet.
const PAYMENT_LABEL: &str = "CryptoNow Merchant";

/// Which path produced the QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrSource {
    /// Server-rendered; a processing fee applies.
    Server,
    /// Locally encoded payment URL; no fee.
    Local,
}

impl QrSource {
    /// The fee notice the UI must show next to the code.
    pub fn fee_notice(&self) -> &'static str {
        match self {
            QrSource::Server => "+ 1 USDC Fee",
            QrSource::Local => "No Fee",
        }
    }
}

/// A generated payment QR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQr {
    pub source: QrSource,
    /// Server path: the image reference returned by the server.
    /// Local path: an SVG document rendering the payment URL.
    pub qr: String,
    /// The encoded payment URL (local path only).
    pub url: Option<String>,
    /// Server-assigned payment id, when the server produced the code.
    pub payment_id: Option<String>,
}

pub struct PaymentQrGenerator {
    api: Arc<dyn PaymentApi>,
    auth: AuthStore,
}

impl PaymentQrGenerator {
    pub fn new(api: Arc<dyn PaymentApi>, auth: AuthStore) -> Self {
        Self { api, auth }
    }

    /// Generate a QR for `amount` of `token`, payable to the connected
    /// wallet. Validation failures block before any network call.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self, amount_input: &str, token: &str) -> Result<GeneratedQr> {
        let amount = validation::validate_amount(amount_input)?;

        let recipient = self
            .auth
            .get_session()
            .address
            .filter(|a| !a.is_empty())
            .ok_or(AppError::AuthRequired)?;

        let mint = token_mint(token)?;
        let message = format!("Payment of {} {}", amount, token);

        let request = CreatePaymentRequest {
            recipient: recipient.clone(),
            amount,
            token: token.to_string(),
            label: PAYMENT_LABEL.to_string(),
            message: message.clone(),
        };

        match self.api.create_payment(&request).await {
            Ok(created) => Ok(GeneratedQr {
                source: QrSource::Server,
                qr: created.qr_code,
                url: None,
                payment_id: created.id,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Server QR failed, generating locally");
                let url = solana_pay_url(&recipient, amount, mint, PAYMENT_LABEL, &message);
                let svg = render_qr_svg(&url)?;
                Ok(GeneratedQr {
                    source: QrSource::Local,
                    qr: svg,
                    url: Some(url),
                    payment_id: None,
                })
            }
        }
    }

    /// Reachability probe for decorating the payment screen.
    pub async fn probe_server(&self) -> bool {
        self.api.probe_server().await
    }
}

/// Mint for a token symbol. SOL maps to no mint; unknown symbols are a
/// validation error rather than a silently wrong payment.
fn token_mint(token: &str) -> Result<Option<&'static str>> {
    if token.eq_ignore_ascii_case("SOL") {
        return Ok(None);
    }
    TOKEN_MINTS
        .get(token.to_ascii_uppercase().as_str())
        .map(|&mint| Some(mint))
        .ok_or_else(|| AppError::validation(format!("Unsupported token: {}", token)))
}

/// Encode a Solana Pay transfer-request URL.
fn solana_pay_url(
    recipient: &str,
    amount: f64,
    mint: Option<&str>,
    label: &str,
    message: &str,
) -> String {
    let mut url = format!("solana:{}?amount={}", recipient, amount);
    if let Some(mint) = mint {
        url.push_str("&spl-token=");
        url.push_str(mint);
    }
    url.push_str("&label=");
    url.push_str(&urlencoding::encode(label));
    url.push_str("&message=");
    url.push_str(&urlencoding::encode(message));
    url
}

fn render_qr_svg(data: &str) -> Result<String> {
    let code = qrcode::QrCode::new(data.as_bytes())
        .map_err(|e| AppError::validation(format!("QR encoding failed: {}", e)))?;

    Ok(code
        .render::<qrcode::render::svg::Color>()
        .min_dimensions(256, 256)
        .build())
}
