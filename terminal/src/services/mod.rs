//! # Services Layer
//!
//! External integrations: the merchant REST API and Solana wallet
//! providers. Everything above this layer talks to services through the
//! traits in [`crate::core::service`] so tests can substitute mocks.

pub mod api;
pub mod wallet;
