//! Small client-side helpers.

pub mod validation;
