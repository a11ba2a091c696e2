//! # Input Validation
//!
//! Local checks applied before any network call. Failures block the action
//! with a [`AppError::Validation`] message; nothing is sent to the server.

use crate::core::{AppError, Result};

/// Parse a user-entered payment amount. Must be a positive finite number.
pub fn validate_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Amount is required"));
    }

    let amount: f64 = trimmed
        .parse()
        .map_err(|_| AppError::validation("Amount must be a number"))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::validation("Amount must be a positive number"));
    }

    Ok(amount)
}

/// Entity names are required and non-blank. Returns the trimmed name.
pub fn validate_entity_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(AppError::validation("Name is required"))
    } else {
        Ok(trimmed.to_string())
    }
}
