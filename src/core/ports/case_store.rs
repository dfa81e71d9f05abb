//! Case store port
//!
//! Defines the interface for holding cases and mutating them by identifier.

use super::super::error::CaseError;
use super::super::models::Case;

/// Storage for cases
///
/// Implementations decide their own concurrency discipline, but `update`
/// must run its closure atomically with respect to every other call so a
/// check-then-set on one case cannot interleave with another.
pub trait CaseStore: Send + Sync {
    /// All cases in store order
    fn list(&self) -> Result<Vec<Case>, CaseError>;

    /// Append a new case
    ///
    /// Fails with [`CaseError::DuplicateId`] if the identifier is taken.
    fn append(&self, case: Case) -> Result<(), CaseError>;

    /// Look up a case by identifier
    fn find(&self, id: &str) -> Result<Option<Case>, CaseError>;

    /// Mutate a case in place and return its new state
    ///
    /// Fails with [`CaseError::NotFound`] for an unknown identifier. If the
    /// closure fails, the case must be left as it was.
    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Case) -> Result<(), CaseError>,
    ) -> Result<Case, CaseError>;

    /// Number of cases held
    fn len(&self) -> Result<usize, CaseError> {
        Ok(self.list()?.len())
    }

    /// Whether the store holds no cases
    fn is_empty(&self) -> Result<bool, CaseError> {
        Ok(self.len()? == 0)
    }

    /// Whether a case with this identifier exists
    fn contains(&self, id: &str) -> Result<bool, CaseError> {
        Ok(self.find(id)?.is_some())
    }
}
