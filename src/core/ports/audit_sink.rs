//! Audit sink port
//!
//! Where officer decisions are written for the immutable trail.

use super::super::models::AuditRecord;

/// Append-only destination for decision records
///
/// The review gate treats this as a notification: a failing or slow sink
/// must never change the outcome of a decision.
pub trait AuditSink: Send + Sync {
    /// Append one record
    fn record(&self, entry: &AuditRecord) -> anyhow::Result<()>;
}
