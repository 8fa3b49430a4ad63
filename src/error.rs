//! Error types for Scrapr
//!
//! Centralized error handling using thiserror.
//!
//! Recoverable extraction failures are deliberately *not* here: they are
//! modeled as [`crate::extract::ExtractFailure`] values, because they carry
//! the detail the repair oracle needs and drive the retry loop instead of
//! aborting it.

use thiserror::Error;

/// All error types that can occur in Scrapr
#[derive(Debug, Error)]
pub enum ScraprError {
    /// Document fetch failed - fatal, aborts the run immediately
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The repair oracle could not be reached (transport, auth, API error)
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// The oracle answered, but the payload does not parse into a rule
    #[error("Malformed proposal: {0}")]
    MalformedProposal(String),

    /// A rule was constructed with an empty locator
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// Agent configuration is unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Scrapr operations
pub type Result<T> = std::result::Result<T, ScraprError>;
