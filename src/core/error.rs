//! Domain errors
//!
//! Everything the intake and review services can refuse, plus a catch-all
//! for store failures that the API reports as internal errors.

use thiserror::Error;

use super::models::Decision;

/// Errors raised by the case store and the services on top of it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseError {
    /// A case with this identifier already exists
    #[error("case '{0}' already exists")]
    DuplicateId(String),

    /// No case with this identifier
    #[error("case '{0}' not found")]
    NotFound(String),

    /// The case already carries a terminal decision
    #[error("case '{id}' was already {status}")]
    AlreadyReviewed {
        /// Case identifier
        id: String,
        /// Decision already on record
        status: Decision,
    },

    /// The backing store failed
    #[error("case store failure: {0}")]
    Storage(String),
}

impl CaseError {
    /// Whether this error means the caller referenced something that does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
