//! Random placeholder verifier
//!
//! Implements `Verifier` by drawing the verdict at random. It stands in for a
//! real image model: a fixed share of cases come back Suspicious with a low
//! confidence, the rest Verified with a high one.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::models::{CaseRecord, Verdict, VerificationStatus};
use crate::core::ports::Verifier;

/// Reason attached to Suspicious verdicts
pub const SUSPICIOUS_REASON: &str =
    "Image analysis suggests metadata tampering or photo-of-a-photo submission.";

/// Reason attached to Verified verdicts
pub const VERIFIED_REASON: &str = "Asset type confirmed. Geo-tag matches loan location.";

/// Draw parameters for [`RandomVerifier`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomPolicy {
    /// Probability that a case is classified Suspicious
    pub suspicion_rate: f64,
    /// Confidence range for Suspicious verdicts, in percent
    pub suspicious_confidence: [f64; 2],
    /// Confidence range for Verified verdicts, in percent
    pub verified_confidence: [f64; 2],
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self {
            suspicion_rate: 0.33,
            suspicious_confidence: [70.0, 85.0],
            verified_confidence: [90.0, 99.9],
        }
    }
}

impl RandomPolicy {
    /// Check that the rate is a probability and the ranges are ordered percentages
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.suspicion_rate) {
            return Err(format!(
                "suspicion_rate must be between 0 and 1, got {}",
                self.suspicion_rate
            ));
        }
        for (name, [lo, hi]) in [
            ("suspicious_confidence", self.suspicious_confidence),
            ("verified_confidence", self.verified_confidence),
        ] {
            if !(0.0..=100.0).contains(&lo) || !(0.0..=100.0).contains(&hi) || lo > hi {
                return Err(format!(
                    "{name} must be an ordered range within 0..=100, got [{lo}, {hi}]"
                ));
            }
        }
        Ok(())
    }
}

/// Verifier that draws each verdict at random
#[derive(Debug)]
pub struct RandomVerifier {
    policy: RandomPolicy,
    rng: Mutex<StdRng>,
}

impl RandomVerifier {
    /// Create a verifier seeded from the OS
    #[must_use]
    pub fn new(policy: RandomPolicy) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a verifier with a fixed seed, for reproducible runs
    #[must_use]
    pub fn seeded(policy: RandomPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomVerifier {
    fn default() -> Self {
        Self::new(RandomPolicy::default())
    }
}

impl Verifier for RandomVerifier {
    fn verify(&self, record: &CaseRecord) -> anyhow::Result<Verdict> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("verifier rng lock poisoned"))?;

        let verdict = if rng.r#gen::<f64>() < self.policy.suspicion_rate {
            let [lo, hi] = self.policy.suspicious_confidence;
            Verdict::new(VerificationStatus::Suspicious, rng.gen_range(lo..=hi), SUSPICIOUS_REASON)
        } else {
            let [lo, hi] = self.policy.verified_confidence;
            Verdict::new(VerificationStatus::Verified, rng.gen_range(lo..=hi), VERIFIED_REASON)
        };

        log::trace!(
            "random verdict for {:?}: {} {}",
            record.case_id(),
            verdict.status,
            verdict.confidence
        );
        Ok(verdict)
    }
}
