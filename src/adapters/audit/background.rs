//! Fire-and-forget audit delivery
//!
//! The review gate must answer immediately even when the ledger is slow. This
//! sink only enqueues; a dedicated worker thread drains the queue into the
//! real sink and logs anything that fails there.

use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use crate::core::models::AuditRecord;
use crate::core::ports::AuditSink;

/// Audit sink that hands records to a worker thread
///
/// Dropping the sink closes the queue and waits for the worker to deliver
/// everything already enqueued.
#[derive(Debug)]
pub struct BackgroundAuditSink {
    sender: Option<Sender<AuditRecord>>,
    worker: Option<JoinHandle<()>>,
}

impl BackgroundAuditSink {
    /// Start a worker delivering to `inner`
    pub fn spawn(inner: Arc<dyn AuditSink>) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<AuditRecord>();
        let worker = thread::Builder::new()
            .name("audit-sink".to_string())
            .spawn(move || {
                for record in receiver {
                    if let Err(e) = inner.record(&record) {
                        log::error!(
                            "failed to write audit record for case '{}': {e:#}",
                            record.case_id
                        );
                    }
                }
                log::debug!("audit queue closed");
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }
}

impl AuditSink for BackgroundAuditSink {
    fn record(&self, entry: &AuditRecord) -> anyhow::Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("audit queue already closed"))?;
        sender
            .send(entry.clone())
            .map_err(|_| anyhow::anyhow!("audit worker is gone"))
    }
}

impl Drop for BackgroundAuditSink {
    fn drop(&mut self) {
        drop(self.sender.take());
        if self.worker.take().is_some_and(|worker| worker.join().is_err()) {
            log::error!("audit worker panicked");
        }
    }
}
