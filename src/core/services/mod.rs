//! Business logic services
//!
//! Orchestration over the port traits. The services own no state; they take
//! the verifier, store and audit sink as arguments and return results.
//!
//! - [`intake`] - Verify and store a batch of submitted records
//! - [`review`] - Apply an officer decision to a pending case

pub mod intake;
pub mod review;

pub use intake::{
    IntakeOptions, IntakeReport, SkipReason, SkippedRecord, submit_batch, submit_values,
};
pub use review::{ReviewOutcome, decide};
