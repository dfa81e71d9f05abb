//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::ApiErrorData;
use crate::core::models::{CaseRecord, Decision};
use crate::core::services::SkippedRecord;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for submitting synced cases
///
/// Records stay raw JSON until intake decodes them one by one, so a single
/// badly typed record cannot sink the whole batch. A missing or `null`
/// `cases` is an empty batch.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitCasesRequest {
    /// Raw case records, in client order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cases: Vec<Value>,
}

impl SubmitCasesRequest {
    /// Build a request from typed records
    #[must_use]
    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        Self {
            cases: records
                .into_iter()
                .map(|record| serde_json::to_value(record).unwrap_or(Value::Null))
                .collect(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for an officer decision
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// Case to decide
    #[serde(default)]
    pub case_id: String,
    /// "Approved" or "Rejected"
    #[serde(default)]
    pub action: String,
    /// Deciding officer (defaults to the configured officer)
    #[serde(default)]
    pub officer: Option<String>,
}

impl ReviewRequest {
    /// Create a request for the configured officer
    #[must_use]
    pub fn new(case_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            action: action.into(),
            officer: None,
        }
    }
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Response for a case submission
#[derive(Debug, Serialize)]
pub struct SubmitCasesData {
    /// Number of cases stored
    pub processed: usize,
    /// Records that were not stored, with reasons
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRecord>,
    /// Summary message
    pub message: String,
}

/// Response for an applied decision
#[derive(Debug, Serialize)]
pub struct ReviewData {
    /// Decided case
    pub case_id: String,
    /// Applied decision
    pub action: Decision,
    /// Deciding officer
    pub officer: String,
    /// Confirmation message
    pub message: String,
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsData {
    /// All cases
    pub total: usize,
    /// Awaiting an officer decision
    pub pending: usize,
    /// Approved by an officer
    pub approved: usize,
    /// Rejected by an officer
    pub rejected: usize,
    /// Verifier said Verified
    pub verified: usize,
    /// Verifier said Suspicious
    pub suspicious: usize,
}
