//! Adapter implementations for port traits
//!
//! This module contains concrete implementations of the core ports:
//!
//! - `memory/` - In-memory case store behind a single mutex
//! - `random/` - Placeholder verifier that draws verdicts at random
//! - `audit/` - Audit sinks (log line, hash-chained ledger file, background queue)

pub mod audit;
pub mod memory;
pub mod random;
