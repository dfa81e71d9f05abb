//! Review gate - applies officer decisions to pending cases
//!
//! A case moves from pending to Approved or Rejected once. A second decision
//! on the same case is refused and leaves both the case and the audit trail
//! untouched.

use crate::core::CaseError;
use crate::core::models::{AuditRecord, Case, Decision};
use crate::core::ports::{AuditSink, CaseStore};

/// A decision that was applied
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    /// The case after the decision
    pub case: Case,
    /// The record sent to the audit sink
    pub audit: AuditRecord,
}

impl ReviewOutcome {
    /// Confirmation line naming the case and the decision
    #[must_use]
    pub fn message(&self) -> String {
        format!("Case {} marked as {}", self.case.id, self.audit.decision)
    }
}

/// Apply an officer decision
///
/// The pending check and the state change happen inside one store update, so
/// two officers racing on the same case produce exactly one success. The audit
/// record is emitted after the change; a sink failure is logged and otherwise
/// ignored.
///
/// # Errors
///
/// - [`CaseError::NotFound`] if no case has this identifier
/// - [`CaseError::AlreadyReviewed`] if the case already carries a decision
/// - [`CaseError::Storage`] if the store fails
pub fn decide(
    store: &dyn CaseStore,
    sink: &dyn AuditSink,
    case_id: &str,
    decision: Decision,
    officer: &str,
) -> Result<ReviewOutcome, CaseError> {
    let audit = AuditRecord::now(case_id, decision, officer);

    let case = store.update(case_id, &mut |case: &mut Case| {
        if let Some(status) = case.review_status {
            return Err(CaseError::AlreadyReviewed {
                id: case.id.clone(),
                status,
            });
        }
        case.review_status = Some(decision);
        case.officer = Some(officer.to_string());
        case.reviewed_at = Some(audit.timestamp.clone());
        Ok(())
    })?;

    log::info!("case '{case_id}' marked as {decision} by {officer}");

    if let Err(e) = sink.record(&audit) {
        log::warn!("audit sink rejected decision for case '{case_id}': {e:#}");
    }

    Ok(ReviewOutcome { case, audit })
}
