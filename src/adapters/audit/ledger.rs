//! Hash-chained ledger file
//!
//! Each decision becomes one JSON line. Every line carries the hash of the
//! line before it, so rewriting or dropping an earlier entry breaks every
//! hash after it. The file is only ever opened for append.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::models::AuditRecord;
use crate::core::ports::AuditSink;

/// Hash used as `prev_hash` of the first entry
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// One line of the ledger file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Position in the ledger, starting at 1
    pub sequence: u64,
    /// The decision being recorded
    pub record: AuditRecord,
    /// Hash of the previous entry
    pub prev_hash: String,
    /// Hash of this entry
    pub hash: String,
}

impl LedgerEntry {
    fn seal(sequence: u64, record: AuditRecord, prev_hash: String) -> anyhow::Result<Self> {
        let hash = entry_hash(sequence, &record, &prev_hash)?;
        Ok(Self {
            sequence,
            record,
            prev_hash,
            hash,
        })
    }
}

fn entry_hash(sequence: u64, record: &AuditRecord, prev_hash: &str) -> anyhow::Result<String> {
    let canonical = serde_json::to_string(record)?;
    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(sequence.to_be_bytes());
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[derive(Debug)]
struct Tail {
    file: File,
    sequence: u64,
    hash: String,
}

/// Audit sink appending to a hash-chained JSON-lines file
#[derive(Debug)]
pub struct LedgerFileSink {
    tail: Mutex<Tail>,
}

impl LedgerFileSink {
    /// Open (or create) a ledger file
    ///
    /// An existing file is verified first; appending to a broken chain is refused.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let (sequence, hash) = if path.exists() {
            let entries = verify_ledger(&path)?;
            entries
                .last()
                .map_or_else(|| (0, GENESIS_HASH.to_string()), |e| (e.sequence, e.hash.clone()))
        } else {
            (0, GENESIS_HASH.to_string())
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open ledger {}", path.display()))?;

        log::debug!("ledger {} opened at sequence {sequence}", path.display());

        Ok(Self {
            tail: Mutex::new(Tail {
                file,
                sequence,
                hash,
            }),
        })
    }
}

impl AuditSink for LedgerFileSink {
    fn record(&self, entry: &AuditRecord) -> anyhow::Result<()> {
        let mut tail = self
            .tail
            .lock()
            .map_err(|_| anyhow::anyhow!("ledger lock poisoned"))?;

        let sealed = LedgerEntry::seal(tail.sequence + 1, entry.clone(), tail.hash.clone())?;
        let mut line = serde_json::to_string(&sealed)?;
        line.push('\n');
        append_line(&mut tail.file, line.as_bytes())
            .context("Failed to append ledger entry")?;

        tail.sequence = sealed.sequence;
        tail.hash = sealed.hash;
        Ok(())
    }
}

/// Append one line, cutting the file back to its old length if the write fails
fn append_line(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    let len = file.metadata()?.len();
    let written = file.write_all(line).and_then(|()| file.flush());
    if let Err(e) = written {
        if let Err(cut) = file.set_len(len) {
            log::error!("failed to cut back partial ledger line: {cut}");
        }
        return Err(e);
    }
    Ok(())
}

/// Read a ledger file and check every link of the chain
///
/// Returns the entries in file order.
pub fn verify_ledger(path: &Path) -> anyhow::Result<Vec<LedgerEntry>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open ledger {}", path.display()))?;

    let mut entries: Vec<LedgerEntry> = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: LedgerEntry = serde_json::from_str(&line)
            .with_context(|| format!("Malformed ledger entry on line {}", n + 1))?;

        let (expected_seq, expected_prev) = entries
            .last()
            .map_or((1, GENESIS_HASH), |prev| (prev.sequence + 1, prev.hash.as_str()));

        if entry.sequence != expected_seq || entry.prev_hash != expected_prev {
            anyhow::bail!("ledger chain broken at line {}", n + 1);
        }
        if entry_hash(entry.sequence, &entry.record, &entry.prev_hash)? != entry.hash {
            anyhow::bail!("ledger entry on line {} does not match its hash", n + 1);
        }
        entries.push(entry);
    }
    Ok(entries)
}
