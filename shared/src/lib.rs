//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the merchant terminal client and
//! the remote merchant API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Wallet login, session validation and logout DTOs
//!   - **[`dto::merchant`]**: Market-network hierarchy entities and requests
//!   - **[`dto::transaction`]**: Transaction history records and paging
//!   - **[`dto::payment`]**: Payment-QR creation DTOs
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Wire Format
//!
//! The server speaks camelCase JSON (`walletAddress`, `sessionKey`,
//! `marketNetworkId`, `hasMore`), so request and response structs carry
//! explicit `#[serde(rename_all = "camelCase")]` attributes rather than
//! relying on default serde field naming. Optional fields are omitted from
//! JSON when `None`.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::auth::LoginRequest;
//!
//! let request = LoginRequest {
//!     wallet_address: "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL".to_string(),
//! };
//! let json = serde_json::to_string(&request).unwrap();
//! assert_eq!(json, r#"{"walletAddress":"8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL"}"#);
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
