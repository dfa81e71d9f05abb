//! Domain models for assetcheck
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`CaseRecord`] - A raw case as submitted by a field client
//! - [`Case`] - A stored case carrying its verdict and review state
//! - [`Verdict`] - What the verifier concluded about a case
//! - [`Decision`] - An officer's terminal review outcome
//! - [`AuditRecord`] - One ledger entry per officer decision

mod audit;
mod case;
mod decision;
mod verdict;

pub use audit::AuditRecord;
pub use case::{Case, CaseRecord, RESERVED_FIELDS};
pub use decision::Decision;
pub use verdict::{Confidence, Verdict, VerificationStatus};
