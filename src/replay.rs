//! Offline replay of a submission and a list of decisions
//!
//! Runs the same handlers the server uses against a fresh state, so a batch
//! file can be checked end to end without starting the server.

use anyhow::Context;
use serde_json::Value;

use crate::api::{self, AppState, ReviewRequest, SubmitCasesRequest};
use crate::output::{ReplayReport, ReviewLine};

/// Parse a case batch, either `{"cases": [...]}` or a bare array
///
/// Records are left as raw JSON; intake decodes and validates each one.
pub fn parse_batch(text: &str) -> anyhow::Result<Vec<Value>> {
    let batch: Value = serde_json::from_str(text).context("Invalid case batch")?;
    match batch {
        Value::Array(cases) => Ok(cases),
        Value::Object(_) => {
            let req: SubmitCasesRequest =
                serde_json::from_value(batch).context("Invalid case batch")?;
            Ok(req.cases)
        },
        _ => anyhow::bail!("Invalid case batch: expected an object or an array"),
    }
}

/// Parse a list of decisions
pub fn parse_reviews(text: &str) -> anyhow::Result<Vec<ReviewRequest>> {
    serde_json::from_str(text).context("Invalid review list")
}

/// Submit `cases`, apply `reviews` in order, and report the final store
///
/// A refused decision is reported and the replay continues.
pub fn replay(
    state: &AppState,
    cases: Vec<Value>,
    reviews: &[ReviewRequest],
) -> anyhow::Result<ReplayReport> {
    let intake = api::submit_cases(state, SubmitCasesRequest { cases })?;

    let reviews = reviews
        .iter()
        .map(|req| match api::review_case(state, req) {
            Ok(data) => ReviewLine {
                case_id: data.case_id,
                action: req.action.clone(),
                applied: true,
                message: data.message,
            },
            Err(e) => ReviewLine {
                case_id: req.case_id.clone(),
                action: req.action.clone(),
                applied: false,
                message: format!("{}: {}", req.case_id, e.message),
            },
        })
        .collect();

    Ok(ReplayReport {
        intake,
        reviews,
        cases: api::list_cases(state)?,
    })
}
