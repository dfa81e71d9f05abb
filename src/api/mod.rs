//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and handlers that
//! can be used by any HTTP server implementation (`tiny_http`, axum, etc.)
//! or directly by clients such as the `replay` command.
//!
//! ## Design
//!
//! - **Handlers are plain functions**: Take the shared state and typed input,
//!   return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod state;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{get_case, get_stats, list_cases, review_case, submit_cases};
pub use state::AppState;
pub use types::{
    ApiResponse, ReviewData, ReviewRequest, StatsData, SubmitCasesData, SubmitCasesRequest,
};
