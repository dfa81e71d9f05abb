//! Audit ledger entries

use serde::{Deserialize, Serialize};

use super::Decision;

/// One immutable record per officer decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Case that was decided
    pub case_id: String,
    /// Applied decision
    pub decision: Decision,
    /// Officer who decided
    pub officer: String,
    /// When the decision was applied (RFC3339)
    pub timestamp: String,
}

impl AuditRecord {
    /// Create a record stamped with the current time
    #[must_use]
    pub fn now(case_id: impl Into<String>, decision: Decision, officer: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            decision,
            officer: officer.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
