//! Pure API handlers
//!
//! These handlers contain request validation and call into the core
//! services. They are HTTP-agnostic: typed input, `Result<T, ApiError>` out.

use super::error::ApiError;
use super::state::AppState;
use super::types::{ReviewData, ReviewRequest, StatsData, SubmitCasesData, SubmitCasesRequest};
use crate::core::models::{Case, Decision, VerificationStatus};
use crate::core::services::{intake, review};

// =============================================================================
// INTAKE
// =============================================================================

/// Verify and store a batch of synced cases
///
/// An empty batch succeeds with nothing processed. Records that do not
/// decode are reported as skipped.
pub fn submit_cases(
    state: &AppState,
    req: SubmitCasesRequest,
) -> Result<SubmitCasesData, ApiError> {
    let report = intake::submit_values(
        req.cases,
        state.verifier.as_ref(),
        state.store.as_ref(),
        &state.intake,
    )?;

    Ok(SubmitCasesData {
        processed: report.processed(),
        message: report.message(),
        skipped: report.skipped,
    })
}

// =============================================================================
// CASES
// =============================================================================

/// List all cases in store order
pub fn list_cases(state: &AppState) -> Result<Vec<Case>, ApiError> {
    Ok(state.store.list()?)
}

/// Get a single case by ID
pub fn get_case(state: &AppState, id: &str) -> Result<Case, ApiError> {
    state
        .store
        .find(id)?
        .ok_or_else(|| ApiError::not_found(format!("Case '{id}' not found")))
}

/// Count cases by review and verification status
pub fn get_stats(state: &AppState) -> Result<StatsData, ApiError> {
    let cases = state.store.list()?;
    let mut stats = StatsData {
        total: cases.len(),
        ..StatsData::default()
    };
    for case in &cases {
        match case.review_status {
            None => stats.pending += 1,
            Some(Decision::Approved) => stats.approved += 1,
            Some(Decision::Rejected) => stats.rejected += 1,
        }
        match case.verification_status {
            VerificationStatus::Verified => stats.verified += 1,
            VerificationStatus::Suspicious => stats.suspicious += 1,
        }
    }
    Ok(stats)
}

// =============================================================================
// REVIEW
// =============================================================================

/// Apply an officer decision to a pending case
pub fn review_case(state: &AppState, req: &ReviewRequest) -> Result<ReviewData, ApiError> {
    let case_id = req.case_id.trim();
    if case_id.is_empty() {
        return Err(ApiError::bad_request("case_id is required"));
    }

    let decision: Decision = req.action.parse().map_err(ApiError::bad_request)?;

    let officer = req
        .officer
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .unwrap_or(state.officer_id.as_str());

    let outcome = review::decide(
        state.store.as_ref(),
        state.audit.as_ref(),
        case_id,
        decision,
        officer,
    )?;

    Ok(ReviewData {
        message: outcome.message(),
        case_id: outcome.case.id,
        action: decision,
        officer: outcome.audit.officer,
    })
}
