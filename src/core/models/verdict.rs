//! Verification verdicts
//!
//! The verifier attaches a verdict to every case at intake time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of the automated asset check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Asset and geo-tag look consistent
    Verified,
    /// Signs of tampering, needs a closer look
    Suspicious,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verified => write!(f, "Verified"),
            Self::Suspicious => write!(f, "Suspicious"),
        }
    }
}

/// Confidence as a percentage in `[0, 100]`
///
/// Serialized for display as a string with one decimal, e.g. `"93.4%"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a confidence, rounded to one decimal and clamped to `[0, 100]`
    #[must_use]
    pub fn new(percent: f64) -> Self {
        let rounded = (percent * 10.0).round() / 10.0;
        Self(rounded.clamp(0.0, 100.0))
    }

    /// Percentage value
    #[must_use]
    pub const fn percent(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.trim().trim_end_matches('%').trim();
        number
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Self::new)
            .ok_or_else(|| format!("Invalid confidence: {s}"))
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(Self::new(v)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// What the verifier concluded about one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Verified or Suspicious
    pub status: VerificationStatus,
    /// How sure the verifier is
    pub confidence: Confidence,
    /// Human-readable explanation
    pub reason: String,
}

impl Verdict {
    /// Create a verdict
    #[must_use]
    pub fn new(status: VerificationStatus, confidence: f64, reason: impl Into<String>) -> Self {
        Self {
            status,
            confidence: Confidence::new(confidence),
            reason: reason.into(),
        }
    }
}
