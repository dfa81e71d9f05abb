//! `tiny_http` server adapter
//!
//! Handles routing, body parsing, and response conversion for `tiny_http`.
//! Routing works on plain strings so it can be exercised without a socket.

use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use percent_encoding::percent_decode_str;
use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::api::{self, ApiError, ApiResponse, AppState, ReviewRequest, SubmitCasesRequest};
use crate::config::ServerConfig;

/// A routed response before it is handed to `tiny_http`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// JSON body
    pub body: String,
}

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Bind to the configured address and serve until SIGINT or SIGTERM
///
/// On a signal the workers finish their current request and stop. The state is
/// dropped before returning, which drains any queued audit records.
pub fn serve(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;
    let server = Arc::new(server);
    let workers = config.workers.max(1);

    let stopper = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log::info!("signal received, shutting down");
        shutdown(&stopper, workers);
    })
    .context("Failed to install signal handler")?;

    log::info!("serving on http://{addr} with {workers} worker(s)");
    run(server, &state, workers)?;
    drop(state);
    log::info!("server stopped");
    Ok(())
}

/// Wake every worker blocked in [`run`] so it returns
pub fn shutdown(server: &Server, workers: usize) {
    for _ in 0..workers.max(1) {
        server.unblock();
    }
}

/// Serve requests from an already bound server on `workers` threads
///
/// Returns once every worker has stopped, which happens when the server is
/// unblocked or dropped.
pub fn run(server: Arc<Server>, state: &AppState, workers: usize) -> anyhow::Result<()> {
    let handles = (0..workers.max(1))
        .map(|n| {
            let server = Arc::clone(&server);
            let state = state.clone();
            thread::Builder::new()
                .name(format!("http-worker-{n}"))
                .spawn(move || {
                    for mut request in server.incoming_requests() {
                        let response = handle_api_request(&state, &mut request);
                        if let Err(e) = request.respond(response) {
                            log::warn!("failed to send response: {e}");
                        }
                    }
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        if handle.join().is_err() {
            log::error!("http worker panicked");
        }
    }
    Ok(())
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle an API request and return a response
pub fn handle_api_request(state: &AppState, request: &mut Request) -> Response<Cursor<Vec<u8>>> {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = String::new();
    let reply = if let Err(e) = request.as_reader().read_to_string(&mut body) {
        error_reply(&ApiError::bad_request(format!("Failed to read request body: {e}")))
    } else {
        dispatch(state, &method, &url, &body)
    };

    log::debug!("{method} {url} -> {}", reply.status);
    to_response(reply)
}

/// Route a request to its handler
///
/// Paths are accepted with an `/api/v1` or `/api` prefix; query strings are ignored.
pub fn dispatch(state: &AppState, method: &Method, url: &str, body: &str) -> Reply {
    let path = url.split('?').next().unwrap_or(url);
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(path)
        .trim_end_matches('/');

    match (method, api_path) {
        (&Method::Get, "/cases") => handle_result(api::list_cases(state)),
        (&Method::Get, "/stats") => handle_result(api::get_stats(state)),

        // POST /upload - submit synced cases
        (&Method::Post, "/upload") => match parse_json::<SubmitCasesRequest>(body) {
            Ok(req) => handle_result(api::submit_cases(state, req)),
            Err(e) => error_reply(&e),
        },

        // POST /review - officer decision
        (&Method::Post, "/review") => match parse_json::<ReviewRequest>(body) {
            Ok(req) => handle_result(api::review_case(state, &req)),
            Err(e) => error_reply(&e),
        },

        // Case detail: GET /cases/{id}, id percent-encoded
        _ if *method == Method::Get && api_path.starts_with("/cases/") => {
            let raw = api_path.strip_prefix("/cases/").unwrap_or("");
            if raw.is_empty() || raw.contains('/') {
                not_found_reply(method, api_path)
            } else {
                match percent_decode_str(raw).decode_utf8() {
                    Ok(id) => handle_result(api::get_case(state, &id)),
                    Err(_) => error_reply(&ApiError::bad_request("Case id is not valid UTF-8")),
                }
            }
        },

        _ => not_found_reply(method, api_path),
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Reply {
    match result {
        Ok(data) => json_reply(&ApiResponse::success(data), 200),
        Err(e) => error_reply(&e),
    }
}

fn error_reply(error: &ApiError) -> Reply {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_reply(&response, error.status_code())
}

fn not_found_reply(method: &Method, path: &str) -> Reply {
    error_reply(&ApiError::not_found(format!("API endpoint not found: {method} {path}")))
}

fn json_reply<T: Serialize>(data: &T, status: u16) -> Reply {
    let body = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    Reply { status, body }
}

fn to_response(reply: Reply) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_data(reply.body.into_bytes())
        .with_status_code(StatusCode(reply.status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
