//! # CryptoNow Merchant Terminal
//!
//! Client for the CryptoNow merchant API: wallet connect/disconnect with
//! server-backed sessions, mnemonic wallet creation and import, CRUD over
//! the market-network hierarchy, a paginated transaction feed, and payment
//! QR generation with a local fallback.
//!
//! ## Architecture
//!
//! - [`core`] — configuration, the application error type, and the service
//!   traits the controllers depend on
//! - [`services`] — the REST [`services::api::ApiClient`] and the wallet
//!   providers
//! - [`storage`] — the two-scope session store
//! - [`app`] — the root [`app::App`] object and the controllers
//! - [`logging`] — file-based tracing setup
//!
//! All business logic and persistence live on the remote server; this
//! crate is state machines, HTTP calls, and session bookkeeping.

pub mod app;
pub mod core;
pub mod logging;
pub mod services;
pub mod storage;
pub mod utils;

pub use crate::app::App;
pub use crate::core::{AppConfig, AppError, Result};
