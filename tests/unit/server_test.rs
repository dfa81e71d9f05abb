//! Tests for the `tiny_http` router
//!
//! Routing is driven through `dispatch`, so no socket is needed. The worker
//! loop itself is run once against a loopback listener.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use assetcheck::adapters::audit::BackgroundAuditSink;
use assetcheck::adapters::memory::InMemoryCaseStore;
use assetcheck::adapters::random::{RandomPolicy, RandomVerifier};
use assetcheck::api::{self, AppState, ReviewRequest};
use assetcheck::core::models::AuditRecord;
use assetcheck::core::ports::AuditSink;
use assetcheck::server::tiny_http::{Reply, dispatch, run, shutdown};
use serde_json::Value;
use tiny_http::{Method, Server};

use crate::common::{RecordingSink, TestApp};

fn json(reply: &Reply) -> Value {
    serde_json::from_str(&reply.body).unwrap()
}

fn upload(app: &TestApp, body: &str) -> Reply {
    dispatch(&app.state, &Method::Post, "/api/upload", body)
}

#[test]
fn test_upload_list_review_flow() {
    let app = TestApp::new();

    let reply = upload(&app, r#"{"cases": [{"id": "CASE-001"}]}"#);
    assert_eq!(reply.status, 200);
    let body = json(&reply);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["processed"], 1);

    let reply = dispatch(&app.state, &Method::Get, "/api/cases", "");
    assert_eq!(reply.status, 200);
    let body = json(&reply);
    assert_eq!(body["data"][0]["id"], "CASE-001");
    assert!(body["data"][0]["reviewStatus"].is_null());

    let reply = dispatch(
        &app.state,
        &Method::Post,
        "/api/review",
        r#"{"case_id": "CASE-001", "action": "Approved"}"#,
    );
    assert_eq!(reply.status, 200);
    assert_eq!(json(&reply)["data"]["message"], "Case CASE-001 marked as Approved");

    let reply = dispatch(&app.state, &Method::Get, "/api/cases/CASE-001", "");
    assert_eq!(json(&reply)["data"]["reviewStatus"], "Approved");
}

#[test]
fn test_route_prefixes_and_query_strings() {
    let app = TestApp::new();
    upload(&app, r#"{"cases": [{"id": "CASE-1"}]}"#);

    for url in ["/cases", "/api/cases", "/api/v1/cases", "/api/cases/", "/api/cases?page=2"] {
        let reply = dispatch(&app.state, &Method::Get, url, "");
        assert_eq!(reply.status, 200, "{url}");
        assert_eq!(json(&reply)["data"].as_array().unwrap().len(), 1, "{url}");
    }
}

#[test]
fn test_empty_upload() {
    let app = TestApp::new();
    let reply = upload(&app, r#"{"cases": []}"#);
    assert_eq!(reply.status, 200);
    assert_eq!(json(&reply)["data"]["message"], "No new cases to process.");
}

#[test]
fn test_badly_typed_record_does_not_fail_upload() {
    let app = TestApp::new();
    let reply = upload(&app, r#"{"cases": [{"id": "CASE-1"}, {"id": 42}, null, {"gps": 1}]}"#);
    assert_eq!(reply.status, 200);
    let body = json(&reply);
    assert_eq!(body["data"]["processed"], 2);
    assert_eq!(body["data"]["skipped"][0]["reason"], "malformed");
    assert_eq!(body["data"]["skipped"][1]["reason"], "malformed");
    assert_eq!(app.case_count(), 2);
}

#[test]
fn test_null_cases_is_empty_upload() {
    let app = TestApp::new();
    let reply = upload(&app, r#"{"cases": null}"#);
    assert_eq!(reply.status, 200);
    assert_eq!(json(&reply)["data"]["message"], "No new cases to process.");
}

#[test]
fn test_invalid_json_is_bad_request() {
    let app = TestApp::new();
    let reply = upload(&app, "{cases: nope");
    assert_eq!(reply.status, 400);
    let body = json(&reply);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(app.case_count(), 0);
}

#[test]
fn test_review_unknown_case_is_404() {
    let app = TestApp::new();
    let reply = dispatch(
        &app.state,
        &Method::Post,
        "/api/review",
        r#"{"case_id": "CASE-DOES-NOT-EXIST", "action": "Approved"}"#,
    );
    assert_eq!(reply.status, 404);
    assert_eq!(json(&reply)["error"]["message"], "Case not found");
}

#[test]
fn test_second_review_is_409() {
    let app = TestApp::new();
    upload(&app, r#"{"cases": [{"id": "CASE-1"}]}"#);
    let body = r#"{"case_id": "CASE-1", "action": "Rejected"}"#;

    assert_eq!(dispatch(&app.state, &Method::Post, "/api/review", body).status, 200);
    let reply = dispatch(&app.state, &Method::Post, "/api/review", body);
    assert_eq!(reply.status, 409);
    assert_eq!(json(&reply)["error"]["code"], "CONFLICT");
}

#[test]
fn test_review_bad_action_is_400() {
    let app = TestApp::new();
    upload(&app, r#"{"cases": [{"id": "CASE-1"}]}"#);
    let reply = dispatch(
        &app.state,
        &Method::Post,
        "/api/review",
        r#"{"case_id": "CASE-1", "action": "Maybe"}"#,
    );
    assert_eq!(reply.status, 400);
}

#[test]
fn test_stats_route() {
    let app = TestApp::new();
    upload(&app, r#"{"cases": [{"id": "CASE-1"}, {"id": "CASE-2"}]}"#);
    let reply = dispatch(&app.state, &Method::Get, "/api/stats", "");
    assert_eq!(reply.status, 200);
    let body = json(&reply);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["pending"], 2);
}

#[test]
fn test_unknown_routes_are_404() {
    let app = TestApp::new();
    for (method, url) in [
        (Method::Get, "/api/nothing"),
        (Method::Delete, "/api/cases"),
        (Method::Get, "/api/cases/a/b"),
        (Method::Get, "/api/cases/missing"),
    ] {
        let reply = dispatch(&app.state, &method, url, "");
        assert_eq!(reply.status, 404, "{method} {url}");
    }
}

#[test]
fn test_case_id_is_percent_decoded() {
    let app = TestApp::new();
    upload(&app, r#"{"cases": [{"id": "CASE 1%"}]}"#);

    let reply = dispatch(&app.state, &Method::Get, "/api/cases/CASE%201%25", "");
    assert_eq!(reply.status, 200);
    assert_eq!(json(&reply)["data"]["id"], "CASE 1%");

    let reply = dispatch(&app.state, &Method::Get, "/api/cases/%FF", "");
    assert_eq!(reply.status, 400);
}

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Audit sink that takes a while per record
struct SlowSink(Arc<RecordingSink>);

impl AuditSink for SlowSink {
    fn record(&self, entry: &AuditRecord) -> anyhow::Result<()> {
        thread::sleep(Duration::from_millis(30));
        self.0.record(entry)
    }
}

fn post(addr: SocketAddr, path: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    write!(
        stream,
        "POST {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn test_run_stops_on_shutdown_and_drains_audit_queue() {
    let recorded = Arc::new(RecordingSink::default());
    let audit = BackgroundAuditSink::spawn(Arc::new(SlowSink(Arc::clone(&recorded)))).unwrap();
    let state = AppState::new(
        Arc::new(InMemoryCaseStore::new()),
        Arc::new(RandomVerifier::seeded(RandomPolicy::default(), 3)),
        Arc::new(audit),
    );

    let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
    let addr = server.server_addr().to_ip().unwrap();
    let worker = {
        let server = Arc::clone(&server);
        let state = state.clone();
        thread::spawn(move || run(server, &state, 2))
    };

    let body = r#"{"cases": [{"id": "A"}, {"id": "B"}, {"id": "C"}]}"#;
    let response = post(addr, "/api/upload", body);
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    let response = post(addr, "/api/review", r#"{"case_id": "A", "action": "Approved"}"#);
    assert!(response.contains("Case A marked as Approved"), "{response}");
    for id in ["B", "C"] {
        api::review_case(&state, &ReviewRequest::new(id, "Rejected")).unwrap();
    }

    shutdown(&server, 2);
    worker.join().unwrap().unwrap();
    drop(state);

    let ids: Vec<_> = recorded.records().into_iter().map(|r| r.case_id).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}
