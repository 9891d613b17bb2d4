//! Cross-cutting error types.
//!
//! Checks never fail with an error: a missing input is a failed check, not an
//! `Err`. These variants cover parsing of identifiers that arrive from config
//! files and the command line.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A section type name did not match any known section.
    #[error("Unknown section type: {0}")]
    UnknownSectionType(String),

    /// An aggregation policy name did not match any known policy.
    #[error("Unknown aggregation policy: {0}")]
    UnknownPolicy(String),

    /// Data failed validation (ranges, weights, format).
    #[error("Validation error: {0}")]
    Validation(String),
}
