//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::api::SubmitCasesData;
use crate::core::models::{Case, Decision, VerificationStatus};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Outcome of one replayed decision
#[derive(Debug, Serialize)]
pub struct ReviewLine {
    /// Case the decision targeted
    pub case_id: String,
    /// Requested action as given
    pub action: String,
    /// Whether the decision was applied
    pub applied: bool,
    /// Confirmation or error message
    pub message: String,
}

/// Result of a replay run
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// Intake summary
    pub intake: SubmitCasesData,
    /// Decisions in the order they were applied
    pub reviews: Vec<ReviewLine>,
    /// Final store contents
    pub cases: Vec<Case>,
}

impl ReplayReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => self.render_json(),
        }
    }

    /// Human-readable rendering
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.intake.message);
        for skip in &self.intake.skipped {
            let _ = writeln!(
                out,
                "  skipped record {} ({}): {}",
                skip.index,
                skip.id.as_deref().unwrap_or("no id"),
                skip.reason
            );
        }

        if !self.reviews.is_empty() {
            let _ = writeln!(out, "\nReviews:");
            for r in &self.reviews {
                let mark = if r.applied { "ok".green() } else { "refused".red() };
                let _ = writeln!(out, "  [{mark}] {}", r.message);
            }
        }

        if self.cases.is_empty() {
            let _ = writeln!(out, "\nNo cases.");
            return out;
        }

        let _ = writeln!(out, "\nCases:");
        for case in &self.cases {
            let status = match case.verification_status {
                VerificationStatus::Verified => case.verification_status.to_string().green(),
                VerificationStatus::Suspicious => case.verification_status.to_string().red(),
            };
            let review = match case.review_status {
                None => "Pending".yellow(),
                Some(Decision::Approved) => "Approved".green(),
                Some(Decision::Rejected) => "Rejected".red(),
            };
            let _ = writeln!(
                out,
                "  {}  {}  {} {}  {}",
                case.id, case.beneficiary, status, case.confidence, review
            );
            let _ = writeln!(out, "      {}", case.verification_reason);
        }
        out
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
