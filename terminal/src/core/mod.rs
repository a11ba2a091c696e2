//! # Core Abstractions
//!
//! Error types, configuration and service traits used throughout the
//! terminal application.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`config`]**: Environment-driven configuration (`AppConfig`)
//! - **[`service`]**: API service traits for dependency injection
//!   (`AuthApi`, `MerchantApi`, `TransactionApi`, `PaymentApi`)
//!
//! ## Dependency Injection
//!
//! The controllers in [`crate::app`] hold `Arc<dyn …Api>` trait objects
//! rather than the concrete [`crate::services::api::ApiClient`], so tests
//! can substitute mock implementations with call counters:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use terminal::core::service::MerchantApi;
//! use terminal::services::api::ApiClient;
//! use terminal::core::config::AppConfig;
//! use terminal::storage::SessionStore;
//!
//! let config = AppConfig::from_env();
//! let store = SessionStore::in_memory();
//! let api: Arc<dyn MerchantApi> = Arc::new(ApiClient::new(&config, store));
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use service::{AuthApi, MerchantApi, PaymentApi, TransactionApi};
