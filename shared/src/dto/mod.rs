//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the merchant REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Wallet login, session validation and logout
//! - [`merchant`] - Network → {Market, Menu}; Market → Table hierarchy
//! - [`transaction`] - Transaction history records and paging
//! - [`payment`] - Payment-QR creation
//!
//! ## Serialization Format
//!
//! The API uses camelCase field names on the wire, so every struct here is
//! annotated with `#[serde(rename_all = "camelCase")]`. Responses arrive in
//! a common envelope:
//!
//! ```text
//! POST /api/merchant/networks
//! Content-Type: application/json
//!
//! {
//!   "walletAddress": "8W6Q…JKAL",
//!   "sessionKey": "d41d8cd9…",
//!   "name": "Downtown",
//!   "description": "Food court"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "success": true,
//!   "data": { "id": 7, "name": "Downtown", "description": "Food court", "createdAt": "2024-01-01T00:00:00Z" }
//! }
//! ```

pub mod auth;
pub mod merchant;
pub mod payment;
pub mod transaction;

pub use auth::*;
pub use merchant::*;
pub use payment::*;
pub use transaction::*;
