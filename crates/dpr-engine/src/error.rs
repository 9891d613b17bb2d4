//! Engine error types.
//!
//! Checks and tier evaluators never return errors; these variants cover the
//! oracle transport and report serialization.

use thiserror::Error;

/// Errors from a semantic oracle attempt. Always absorbed into an indeterminate
/// check outcome by [`crate::oracle::consult`].
#[derive(Debug, Error)]
pub enum OracleError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The oracle returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the oracle.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The response could not be read as a PASS/FAIL verdict.
    #[error("malformed verdict: {0}")]
    Malformed(String),

    /// The attempt exceeded its time budget.
    #[error("timed out after {0} ms")]
    Timeout(u128),
}

/// Errors surfaced by the engine's public API.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Report serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
