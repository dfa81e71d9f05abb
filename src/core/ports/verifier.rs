//! Verifier port
//!
//! Produces a verdict for a submitted case record.

use super::super::models::{CaseRecord, Verdict};

/// Source of verification verdicts
///
/// Intake calls this synchronously for each record. Implementations range from
/// the placeholder random policy to a real image model.
pub trait Verifier: Send + Sync {
    /// Produce a verdict for one record
    ///
    /// An error skips the record; it never aborts the batch.
    fn verify(&self, record: &CaseRecord) -> anyhow::Result<Verdict>;
}
