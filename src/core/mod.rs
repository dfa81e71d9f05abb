//! Core domain logic for assetcheck
//!
//! This module contains the intake and review logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Case, Verdict, Decision, AuditRecord)
//! - `services/` - Intake processor and review gate
//! - `ports/` - Trait definitions for the verifier, store and audit sink

mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::CaseError;
