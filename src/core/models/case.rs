//! Case model
//!
//! A case is one loan-asset submission. It arrives as a loosely-shaped
//! [`CaseRecord`], picks up a verdict at intake, and becomes a [`Case`] that
//! waits for an officer decision.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use super::{Confidence, Decision, Verdict, VerificationStatus};

/// Field names owned by the stored case
///
/// Submitted records may not smuggle these in through their metadata.
pub const RESERVED_FIELDS: &[&str] = &[
    "id",
    "beneficiary",
    "timestamp",
    "gps",
    "assetImage",
    "ai_status",
    "confidence",
    "ai_reason",
    "reviewStatus",
    "officer",
    "reviewedAt",
];

/// A raw case record as submitted by a field client
///
/// Known fields are typed; anything else lands in `metadata` and is carried
/// through to the stored case untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Externally supplied case identifier, a string or an integer on the wire
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Loan beneficiary name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,

    /// When the field agent captured the case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Geolocation of the capture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<String>,

    /// Reference to the asset photo
    #[serde(rename = "assetImage", default, skip_serializing_if = "Option::is_none")]
    pub asset_image: Option<String>,

    /// Extra client fields
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl CaseRecord {
    /// Create a record with just an identifier
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// The identifier, if present and not blank
    #[must_use]
    pub fn case_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

/// A stored case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Unique case identifier, never reassigned
    pub id: String,

    /// Loan beneficiary name
    pub beneficiary: String,

    /// Submission timestamp
    pub timestamp: String,

    /// Geolocation string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<String>,

    /// Asset image reference
    #[serde(rename = "assetImage", default, skip_serializing_if = "Option::is_none")]
    pub asset_image: Option<String>,

    /// Verifier outcome
    #[serde(rename = "ai_status")]
    pub verification_status: VerificationStatus,

    /// Verifier confidence
    pub confidence: Confidence,

    /// Verifier explanation
    #[serde(rename = "ai_reason")]
    pub verification_reason: String,

    /// Officer decision, `None` while awaiting review
    #[serde(rename = "reviewStatus", default)]
    pub review_status: Option<Decision>,

    /// Officer who decided the case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer: Option<String>,

    /// When the decision was recorded (RFC3339)
    #[serde(rename = "reviewedAt", default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,

    /// Extra client fields passed through from the record
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl Case {
    /// Build a pending case from a submitted record and its verdict
    ///
    /// Reserved keys are dropped from the record's metadata so the verdict and
    /// review fields cannot be preset by the client.
    #[must_use]
    pub fn from_record(
        id: String,
        record: CaseRecord,
        verdict: Verdict,
        default_beneficiary: &str,
        received_at: &str,
    ) -> Self {
        let mut metadata = record.metadata;
        metadata.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));

        Self {
            id,
            beneficiary: record
                .beneficiary
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| default_beneficiary.to_string()),
            timestamp: record.timestamp.unwrap_or_else(|| received_at.to_string()),
            gps: record.gps,
            asset_image: record.asset_image,
            verification_status: verdict.status,
            confidence: verdict.confidence,
            verification_reason: verdict.reason,
            review_status: None,
            officer: None,
            reviewed_at: None,
            metadata,
        }
    }

    /// Whether the case still awaits an officer decision
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.review_status.is_none()
    }
}
