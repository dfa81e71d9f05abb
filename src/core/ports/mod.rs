//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the intake/review logic and
//! everything it leans on: the verdict source, the case store and the audit
//! ledger.
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The services depend only on these traits, never on concrete
//! implementations. This enables:
//!
//! - **Testability**: Recording fakes in unit tests
//! - **Flexibility**: Swap the random verifier for a real model without touching intake
//! - **Clarity**: The concurrency discipline lives in one adapter

mod audit_sink;
mod case_store;
mod verifier;

pub use audit_sink::AuditSink;
pub use case_store::CaseStore;
pub use verifier::Verifier;
