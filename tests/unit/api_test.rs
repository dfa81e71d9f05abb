//! Tests for the API module
//!
//! Error mapping, request/response types, and the intake and review handlers.

use crate::common::{TestApp, batch, records};

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use assetcheck::api::{ApiError, ErrorCode};
    use assetcheck::core::CaseError;
    use assetcheck::core::models::Decision;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::conflict("x").status_code(), 409);
        assert_eq!(ApiError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::not_found("Case missing");
        let display = format!("{err}");
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("Case missing"));
    }

    #[test]
    fn test_case_errors_map_to_codes() {
        let not_found: ApiError = CaseError::NotFound("C-1".into()).into();
        assert_eq!(not_found.code, ErrorCode::NotFound);
        assert_eq!(not_found.message, "Case not found");

        let conflict: ApiError = CaseError::AlreadyReviewed {
            id: "C-1".into(),
            status: Decision::Approved,
        }
        .into();
        assert_eq!(conflict.code, ErrorCode::Conflict);
        assert!(conflict.message.contains("already Approved"));
    }

    #[test]
    fn test_storage_error_hides_cause() {
        let err: ApiError = CaseError::Storage("disk on fire".into()).into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(!err.message.contains("disk on fire"));
    }
}

// =============================================================================
// RESPONSE AND REQUEST TYPES
// =============================================================================

mod type_tests {
    use assetcheck::api::{ApiResponse, ReviewRequest, SubmitCasesRequest};

    #[test]
    fn test_api_response_success() {
        let resp: ApiResponse<String> = ApiResponse::success("hello".to_string());
        assert!(resp.success);
        assert_eq!(resp.data, Some("hello".to_string()));
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_api_response_error_serializes_without_data() {
        let resp = ApiResponse::<()>::error("NOT_FOUND", "Case not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[test]
    fn test_submit_request_defaults_to_empty() {
        let req: SubmitCasesRequest = serde_json::from_str("{}").unwrap();
        assert!(req.cases.is_empty());
    }

    #[test]
    fn test_submit_request_null_cases_is_empty() {
        let req: SubmitCasesRequest = serde_json::from_str(r#"{"cases": null}"#).unwrap();
        assert!(req.cases.is_empty());
    }

    #[test]
    fn test_submit_request_keeps_records_raw() {
        let json = r#"{"cases": [{"id": "CASE-1", "loan": "L-77"}, null, {"id": 42}]}"#;
        let req: SubmitCasesRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.cases.len(), 3);
        assert_eq!(req.cases[0]["loan"], "L-77");
        assert!(req.cases[1].is_null());
    }

    #[test]
    fn test_review_request_officer_optional() {
        let req: ReviewRequest =
            serde_json::from_str(r#"{"case_id": "CASE-1", "action": "Approved"}"#).unwrap();
        assert_eq!(req.case_id, "CASE-1");
        assert_eq!(req.action, "Approved");
        assert!(req.officer.is_none());
    }
}

// =============================================================================
// INTAKE HANDLER
// =============================================================================

mod intake_tests {
    use super::*;
    use assetcheck::api::{self, SubmitCasesRequest};
    use assetcheck::core::models::{CaseRecord, VerificationStatus};
    use assetcheck::core::services::SkipReason;

    #[test]
    fn test_empty_batch_succeeds_without_mutation() {
        let app = TestApp::new();
        let data = api::submit_cases(&app.state, SubmitCasesRequest::default()).unwrap();
        assert_eq!(data.processed, 0);
        assert_eq!(data.message, "No new cases to process.");
        assert_eq!(app.case_count(), 0);
    }

    #[test]
    fn test_batch_grows_store_by_its_length() {
        let app = TestApp::new();
        api::submit_cases(&app.state, batch(records("A", 3))).unwrap();
        let before = app.case_count();

        let data = api::submit_cases(&app.state, batch(records("B", 5))).unwrap();

        assert_eq!(data.processed, 5);
        assert_eq!(app.case_count(), before + 5);
    }

    #[test]
    fn test_listed_cases_carry_verdict_and_pending_review() {
        let app = TestApp::new();
        api::submit_cases(&app.state, batch(records("C", 20))).unwrap();

        for case in api::list_cases(&app.state).unwrap() {
            assert!(case.is_pending());
            let c = case.confidence.percent();
            match case.verification_status {
                VerificationStatus::Verified => assert!((90.0..=99.9).contains(&c)),
                VerificationStatus::Suspicious => assert!((70.0..=85.0).contains(&c)),
            }
            assert!(!case.verification_reason.is_empty());
        }
    }

    #[test]
    fn test_submitted_fields_survive_round_trip() {
        let app = TestApp::new();
        let json = r#"{
            "id": "CASE-87345",
            "beneficiary": "Pravin R.",
            "timestamp": "2025-09-25T10:00:00Z",
            "gps": "14.5087° N, 75.9221° E",
            "assetImage": "https://placehold.co/400x300?text=Tractor",
            "assetType": "tractor"
        }"#;
        let record: CaseRecord = serde_json::from_str(json).unwrap();
        api::submit_cases(&app.state, batch(vec![record])).unwrap();

        let case = api::get_case(&app.state, "CASE-87345").unwrap();
        assert_eq!(case.beneficiary, "Pravin R.");
        assert_eq!(case.timestamp, "2025-09-25T10:00:00Z");
        assert_eq!(case.gps.as_deref(), Some("14.5087° N, 75.9221° E"));
        assert_eq!(
            case.asset_image.as_deref(),
            Some("https://placehold.co/400x300?text=Tractor")
        );
        assert_eq!(case.metadata["assetType"], "tractor");
    }

    #[test]
    fn test_malformed_records_are_reported() {
        let app = TestApp::new();
        let cases = vec![
            CaseRecord::with_id("CASE-1"),
            CaseRecord::default(),
            CaseRecord::with_id("CASE-1"),
        ];
        let data = api::submit_cases(&app.state, batch(cases)).unwrap();

        assert_eq!(data.processed, 1);
        assert_eq!(data.skipped.len(), 2);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["skipped"][0]["reason"], "missing_id");
        assert_eq!(json["skipped"][1]["reason"], "duplicate_id");
        assert_eq!(json["skipped"][1]["id"], "CASE-1");
    }

    fn upload(app: &TestApp, json: &str) -> assetcheck::api::SubmitCasesData {
        let req: SubmitCasesRequest = serde_json::from_str(json).unwrap();
        api::submit_cases(&app.state, req).unwrap()
    }

    #[test]
    fn test_numeric_id_is_stored_as_text() {
        let app = TestApp::new();
        let data = upload(&app, r#"{"cases": [{"id": "CASE-1"}, {"id": 42}]}"#);
        assert_eq!(data.processed, 2);
        assert!(data.skipped.is_empty());
        assert_eq!(api::get_case(&app.state, "42").unwrap().id, "42");
    }

    #[test]
    fn test_null_entry_is_skipped_and_rest_stored() {
        let app = TestApp::new();
        let data = upload(&app, r#"{"cases": [{"id": "CASE-2"}, null]}"#);
        assert_eq!(data.processed, 1);
        assert_eq!(data.skipped.len(), 1);
        assert_eq!(data.skipped[0].index, 1);
        assert_eq!(data.skipped[0].reason, SkipReason::Malformed);
        assert!(api::get_case(&app.state, "CASE-2").is_ok());
    }

    #[test]
    fn test_wrongly_typed_field_skips_only_that_record() {
        let app = TestApp::new();
        let data = upload(
            &app,
            r#"{"cases": [
                {"id": "CASE-3", "gps": {"lat": 14.5, "lng": 75.9}},
                {"id": "CASE-4", "gps": "14.5087° N, 75.9221° E"}
            ]}"#,
        );
        assert_eq!(data.processed, 1);
        assert_eq!(data.skipped[0].id.as_deref(), Some("CASE-3"));
        assert_eq!(data.skipped[0].reason, SkipReason::Malformed);
        assert_eq!(app.case_count(), 1);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["skipped"][0]["reason"], "malformed");
    }

    #[test]
    fn test_null_cases_is_an_empty_batch() {
        let app = TestApp::new();
        let data = upload(&app, r#"{"cases": null}"#);
        assert_eq!(data.processed, 0);
        assert_eq!(data.message, "No new cases to process.");
    }
}

// =============================================================================
// REVIEW HANDLER
// =============================================================================

mod review_tests {
    use super::*;
    use assetcheck::api::{self, ErrorCode, ReviewRequest, SubmitCasesRequest};
    use assetcheck::core::models::Decision;

    fn app_with(ids: &[&str]) -> TestApp {
        let app = TestApp::new();
        let cases = ids
            .iter()
            .map(|id| assetcheck::core::models::CaseRecord::with_id(*id))
            .collect();
        api::submit_cases(&app.state, batch(cases)).unwrap();
        app
    }

    #[test]
    fn test_concrete_scenario_case_001() {
        let app = TestApp::new();
        let req: SubmitCasesRequest =
            serde_json::from_str(r#"{"cases": [{"id": "CASE-001"}]}"#).unwrap();
        let data = api::submit_cases(&app.state, req).unwrap();
        assert_eq!(data.processed, 1);

        let cases = api::list_cases(&app.state).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, "CASE-001");
        assert!(cases[0].review_status.is_none());

        let review = api::review_case(&app.state, &ReviewRequest::new("CASE-001", "Approved"))
            .unwrap();
        assert_eq!(review.message, "Case CASE-001 marked as Approved");
        assert_eq!(review.case_id, "CASE-001");
        assert_eq!(review.action, Decision::Approved);

        let cases = api::list_cases(&app.state).unwrap();
        assert_eq!(cases[0].review_status, Some(Decision::Approved));
        let json = serde_json::to_value(&cases[0]).unwrap();
        assert_eq!(json["reviewStatus"], "Approved");
    }

    #[test]
    fn test_approve_stamps_configured_officer() {
        let app = app_with(&["CASE-1"]);
        let review =
            api::review_case(&app.state, &ReviewRequest::new("CASE-1", "Approved")).unwrap();
        assert_eq!(review.officer, "OFF-TEST");

        let case = api::get_case(&app.state, "CASE-1").unwrap();
        assert_eq!(case.officer.as_deref(), Some("OFF-TEST"));
    }

    #[test]
    fn test_request_officer_overrides_default() {
        let app = app_with(&["CASE-1"]);
        let req = ReviewRequest {
            officer: Some("OFF-42".into()),
            ..ReviewRequest::new("CASE-1", "Rejected")
        };
        let review = api::review_case(&app.state, &req).unwrap();
        assert_eq!(review.officer, "OFF-42");
        assert_eq!(app.sink.records()[0].officer, "OFF-42");
    }

    #[test]
    fn test_unknown_case_is_not_found_and_store_unchanged() {
        let app = app_with(&["CASE-1"]);
        let before = api::list_cases(&app.state).unwrap();

        let req = ReviewRequest::new("CASE-DOES-NOT-EXIST", "Approved");
        let err = api::review_case(&app.state, &req).unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(api::list_cases(&app.state).unwrap(), before);
        assert!(app.sink.records().is_empty());
    }

    #[test]
    fn test_unknown_action_is_bad_request() {
        let app = app_with(&["CASE-1"]);
        let err =
            api::review_case(&app.state, &ReviewRequest::new("CASE-1", "Escalate")).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert!(api::get_case(&app.state, "CASE-1").unwrap().is_pending());
    }

    #[test]
    fn test_blank_case_id_is_bad_request() {
        let app = app_with(&["CASE-1"]);
        let err = api::review_case(&app.state, &ReviewRequest::new("  ", "Approved")).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_re_review_is_conflict() {
        let app = app_with(&["CASE-1"]);
        api::review_case(&app.state, &ReviewRequest::new("CASE-1", "Rejected")).unwrap();

        let err =
            api::review_case(&app.state, &ReviewRequest::new("CASE-1", "Approved")).unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        let case = api::get_case(&app.state, "CASE-1").unwrap();
        assert_eq!(case.review_status, Some(Decision::Rejected));
        assert_eq!(app.sink.records().len(), 1);
    }

    #[test]
    fn test_each_decision_emits_one_audit_record() {
        let app = app_with(&["CASE-1", "CASE-2"]);
        api::review_case(&app.state, &ReviewRequest::new("CASE-1", "Approved")).unwrap();
        api::review_case(&app.state, &ReviewRequest::new("CASE-2", "rejected")).unwrap();

        let records = app.sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].case_id, "CASE-1");
        assert_eq!(records[0].decision, Decision::Approved);
        assert_eq!(records[1].case_id, "CASE-2");
        assert_eq!(records[1].decision, Decision::Rejected);
        assert!(chrono::DateTime::parse_from_rfc3339(&records[1].timestamp).is_ok());
    }

    #[test]
    fn test_stats_count_review_and_verdicts() {
        let app = app_with(&["CASE-1", "CASE-2", "CASE-3"]);
        api::review_case(&app.state, &ReviewRequest::new("CASE-1", "Approved")).unwrap();
        api::review_case(&app.state, &ReviewRequest::new("CASE-2", "Rejected")).unwrap();

        let stats = api::get_stats(&app.state).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.verified + stats.suspicious, 3);
    }

    #[test]
    fn test_get_unknown_case_is_not_found() {
        let app = TestApp::new();
        let err = api::get_case(&app.state, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
