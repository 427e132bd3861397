//! # Error Types — Infrastructure Failures
//!
//! Errors that are *not* constitutional violations: malformed input values,
//! canonicalization failures, and arithmetic that cannot be represented
//! exactly. Rule failures are reported through [`crate::Violation`] instead.
//!
//! ## Design
//!
//! - A rule that does not hold is a `Violation`, never a `CharterError`.
//! - A value that cannot even be evaluated (unparseable decimal, empty
//!   citation, a record that will not canonicalize) is a `CharterError`.

use thiserror::Error;

/// Top-level infrastructure error for the charter crates.
#[derive(Error, Debug)]
pub enum CharterError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A decimal value could not be parsed or would overflow.
    #[error("decimal error: {0}")]
    Decimal(String),

    /// An article citation was empty.
    #[error("article citation must not be empty")]
    EmptyCitation,
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts must be strings or integers.
    #[error("float values are not permitted in canonical representations; use string or integer: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
