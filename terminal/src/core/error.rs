//! # Common Error Types
//!
//! Consolidated error handling for the terminal application.
//!
//! ## Error Categories
//!
//! - **Api**: merchant API communication failures (network, timeout, HTTP,
//!   JSON parsing, server-reported business errors)
//! - **Wallet**: wallet provider operations (connect, key load, derivation)
//! - **Storage**: session store read/write failures that callers chose not
//!   to swallow
//! - **Validation**: local input validation (empty name, invalid amount,
//!   invalid mnemonic) — always raised before any network call
//! - **AuthRequired**: a mutating operation was attempted without a wallet
//!   session; the UI should prompt for wallet connection
//!
//! Transport and server errors are recoverable by design: they surface as
//! messages or retry affordances and never leave the UI half-updated.

use thiserror::Error;

use crate::services::api::ApiError;
use crate::services::wallet::WalletError;

/// Application-wide error type covering all error scenarios in the terminal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Merchant API communication error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Wallet provider or key-management error.
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Session storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation requires a connected wallet session.
    #[error("Please connect your wallet first")]
    AuthRequired,
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Validation helper used by the controllers.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = AppError::validation("Amount must be positive");
        assert_eq!(err.to_string(), "Validation error: Amount must be positive");

        assert_eq!(
            AppError::AuthRequired.to_string(),
            "Please connect your wallet first"
        );
    }
}
