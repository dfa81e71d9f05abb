//! Audit sinks
//!
//! Implementations of `AuditSink`:
//!
//! - [`LogAuditSink`] - one log line per decision on the `ledger` target
//! - [`LedgerFileSink`] - append-only JSON-lines file with a SHA-256 hash chain
//! - [`BackgroundAuditSink`] - queues records for another sink on a worker thread

mod background;
mod ledger;

pub use background::BackgroundAuditSink;
pub use ledger::{GENESIS_HASH, LedgerEntry, LedgerFileSink, verify_ledger};

use crate::core::models::AuditRecord;
use crate::core::ports::AuditSink;

/// Log target used for audit lines
pub const LEDGER_TARGET: &str = "ledger";

/// Audit sink that writes each decision to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAuditSink;

impl LogAuditSink {
    /// Create a new log sink
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AuditSink for LogAuditSink {
    fn record(&self, entry: &AuditRecord) -> anyhow::Result<()> {
        log::info!(
            target: LEDGER_TARGET,
            "final action '{}' for {} by {} at {}",
            entry.decision,
            entry.case_id,
            entry.officer,
            entry.timestamp
        );
        Ok(())
    }
}
