//! Intake service - verifies submitted records and appends them to the store
//!
//! Records are handled one at a time and independently. A bad record is
//! skipped and reported; it does not stop the rest of the batch. Nothing is
//! rolled back: a store failure stops the batch where it is.

use serde::Serialize;
use serde_json::Value;

use crate::core::CaseError;
use crate::core::models::{Case, CaseRecord};
use crate::core::ports::{CaseStore, Verifier};

/// Beneficiary used when a record carries none
pub const DEFAULT_BENEFICIARY: &str = "Default User";

/// Knobs for intake normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeOptions {
    /// Placeholder beneficiary for records without one
    pub default_beneficiary: String,
}

impl Default for IntakeOptions {
    fn default() -> Self {
        Self {
            default_beneficiary: DEFAULT_BENEFICIARY.to_string(),
        }
    }
}

/// Why a record was not stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not a case object, or a known field has the wrong type
    Malformed,
    /// No identifier, or a blank one
    MissingId,
    /// Identifier already in the store or earlier in the batch
    DuplicateId,
    /// The verifier could not produce a verdict
    VerificationFailed,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed record"),
            Self::MissingId => write!(f, "missing id"),
            Self::DuplicateId => write!(f, "duplicate id"),
            Self::VerificationFailed => write!(f, "verification failed"),
        }
    }
}

/// A record that was left out of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position in the submitted batch
    pub index: usize,
    /// Identifier, when the record had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Result of processing one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakeReport {
    /// Identifiers stored, in submission order
    pub accepted: Vec<String>,
    /// Records that were skipped
    pub skipped: Vec<SkippedRecord>,
}

impl IntakeReport {
    /// Number of cases stored
    #[must_use]
    pub fn processed(&self) -> usize {
        self.accepted.len()
    }

    /// Summary line for the submitting client
    #[must_use]
    pub fn message(&self) -> String {
        if self.accepted.is_empty() && self.skipped.is_empty() {
            return "No new cases to process.".to_string();
        }
        let mut msg = format!(
            "Successfully synced and processed {} case(s). Officer dashboard updated.",
            self.processed()
        );
        if !self.skipped.is_empty() {
            msg.push_str(&format!(" Skipped {} record(s).", self.skipped.len()));
        }
        msg
    }
}

/// Verify and store a batch of records
///
/// # Arguments
///
/// * `records` - Submitted records, in client order
/// * `verifier` - Verdict source, called once per well-formed record
/// * `store` - Destination store, appended to record by record
/// * `options` - Normalization settings
///
/// # Errors
///
/// Returns [`CaseError::Storage`] if the store fails. Cases appended before
/// the failure stay in the store.
pub fn submit_batch(
    records: Vec<CaseRecord>,
    verifier: &dyn Verifier,
    store: &dyn CaseStore,
    options: &IntakeOptions,
) -> Result<IntakeReport, CaseError> {
    process(records.into_iter().map(Ok), verifier, store, options)
}

/// Decode and store a batch of raw JSON values
///
/// Each element is decoded on its own. One that is not a valid case record is
/// skipped as [`SkipReason::Malformed`] and the rest of the batch goes on.
///
/// # Errors
///
/// Same as [`submit_batch`].
pub fn submit_values(
    values: Vec<Value>,
    verifier: &dyn Verifier,
    store: &dyn CaseStore,
    options: &IntakeOptions,
) -> Result<IntakeReport, CaseError> {
    let decoded = values.into_iter().map(|value| {
        let id = value.get("id").and_then(raw_id);
        serde_json::from_value::<CaseRecord>(value).map_err(|e| (id, e.to_string()))
    });
    process(decoded, verifier, store, options)
}

fn raw_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

type Decoded = Result<CaseRecord, (Option<String>, String)>;

fn process(
    records: impl ExactSizeIterator<Item = Decoded>,
    verifier: &dyn Verifier,
    store: &dyn CaseStore,
    options: &IntakeOptions,
) -> Result<IntakeReport, CaseError> {
    let mut report = IntakeReport::default();
    let batch_len = records.len();
    if batch_len == 0 {
        log::debug!("empty intake batch, nothing to do");
        return Ok(report);
    }

    let received_at = chrono::Utc::now().to_rfc3339();

    for (index, decoded) in records.enumerate() {
        let record = match decoded {
            Ok(record) => record,
            Err((id, cause)) => {
                log::warn!("skipping record {index}: {cause}");
                report.skipped.push(SkippedRecord {
                    index,
                    id,
                    reason: SkipReason::Malformed,
                });
                continue;
            },
        };

        let Some(id) = record.case_id().map(String::from) else {
            log::warn!("skipping record {index}: missing id");
            report.skipped.push(SkippedRecord {
                index,
                id: None,
                reason: SkipReason::MissingId,
            });
            continue;
        };

        if store.contains(&id)? {
            log::warn!("skipping record {index}: case '{id}' already exists");
            report.skipped.push(SkippedRecord {
                index,
                id: Some(id),
                reason: SkipReason::DuplicateId,
            });
            continue;
        }

        let verdict = match verifier.verify(&record) {
            Ok(verdict) => verdict,
            Err(e) => {
                log::error!("verification failed for case '{id}': {e:#}");
                report.skipped.push(SkippedRecord {
                    index,
                    id: Some(id),
                    reason: SkipReason::VerificationFailed,
                });
                continue;
            },
        };

        log::debug!(
            "case '{id}' verified as {} ({})",
            verdict.status,
            verdict.confidence
        );

        let case = Case::from_record(
            id.clone(),
            record,
            verdict,
            &options.default_beneficiary,
            &received_at,
        );

        match store.append(case) {
            Ok(()) => report.accepted.push(id),
            Err(CaseError::DuplicateId(_)) => {
                log::warn!("skipping record {index}: case '{id}' already exists");
                report.skipped.push(SkippedRecord {
                    index,
                    id: Some(id),
                    reason: SkipReason::DuplicateId,
                });
            },
            Err(e) => {
                log::error!("intake aborted at record {index} of {batch_len}: {e}");
                return Err(e);
            },
        }
    }

    log::info!(
        "intake batch of {batch_len}: {} stored, {} skipped",
        report.processed(),
        report.skipped.len()
    );

    Ok(report)
}
