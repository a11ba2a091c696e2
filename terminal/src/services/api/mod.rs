//! # Merchant API Client Module
//!
//! HTTP client for communicating with the remote merchant REST API.
//! Handles wallet-session auth, the market-network hierarchy, transaction
//! history and payment creation.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and the ApiError type
//! ├── client.rs       - ApiClient struct and common request plumbing
//! ├── auth.rs         - Auth endpoints (login, validate, logout)
//! ├── merchant.rs     - Market-network hierarchy CRUD
//! ├── transaction.rs  - Transaction history paging and mock seeding
//! └── payment.rs      - Payment-QR creation
//! ```
//!
//! Endpoint functions are free functions taking `&ApiClient`; the client
//! also implements the [`crate::core::service`] traits by delegating to
//! them, which is the seam controllers and tests program against.

pub mod auth;
pub mod client;
pub mod merchant;
pub mod payment;
pub mod transaction;

pub use client::ApiClient;

use thiserror::Error;

/// Errors from the merchant API client.
///
/// Transport failures and server-reported business errors both end up here;
/// callers map them to UI feedback and never treat them as fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed (DNS, connection refused, TLS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded its client-side timeout.
    #[error("Request timed out")]
    Timeout,

    /// The response body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The server answered with an error; the message is surfaced verbatim.
    #[error("{0}")]
    Server(String),
}

impl ApiError {
    /// Map a reqwest error, distinguishing timeouts from other transport
    /// failures.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_verbatim() {
        let err = ApiError::Server("session expired".to_string());
        assert_eq!(err.to_string(), "session expired");
    }

    #[test]
    fn timeout_display() {
        assert_eq!(ApiError::Timeout.to_string(), "Request timed out");
    }
}
