//! Agent run outcome types.
//!
//! This module defines the result types for an agent run.

use crate::domain::Record;
use crate::extract::ExtractFailure;

/// Outcome of an agent run.
///
/// A fatal fetch error is *not* an outcome - it propagates as an error
/// before any extraction attempt is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Extraction succeeded - a non-empty record sequence in document order
    Success(Vec<Record>),
    /// The agent gave up - attempt budget exhausted, or repair itself failed
    GaveUp {
        /// Number of extraction attempts made
        attempts: u32,
        /// The last extraction failure, for reporting
        reason: ExtractFailure,
    },
}

impl RunOutcome {
    /// Whether the run ended with records.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success(_))
    }

    /// The extracted records, if any.
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            RunOutcome::Success(records) => Some(records),
            RunOutcome::GaveUp { .. } => None,
        }
    }
}
