//! Shared application state
//!
//! Everything a handler needs: the store, the verifier, the audit sink and
//! the intake/review settings. Cloning is cheap; every clone shares the same
//! store.

use std::sync::Arc;

use anyhow::Context;

use crate::adapters::audit::{BackgroundAuditSink, LedgerFileSink, LogAuditSink};
use crate::adapters::memory::InMemoryCaseStore;
use crate::adapters::random::RandomVerifier;
use crate::config::{AppConfig, AuditSinkKind, DEFAULT_OFFICER_ID};
use crate::core::ports::{AuditSink, CaseStore, Verifier};
use crate::core::services::IntakeOptions;

/// Handles to the collaborators behind the API
#[derive(Clone)]
pub struct AppState {
    /// Case store
    pub store: Arc<dyn CaseStore>,
    /// Verdict source for intake
    pub verifier: Arc<dyn Verifier>,
    /// Destination for decision records
    pub audit: Arc<dyn AuditSink>,
    /// Intake normalization
    pub intake: IntakeOptions,
    /// Officer stamped when a decision names none
    pub officer_id: String,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("intake", &self.intake)
            .field("officer_id", &self.officer_id)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create state with default intake and review settings
    #[must_use]
    pub fn new(
        store: Arc<dyn CaseStore>,
        verifier: Arc<dyn Verifier>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            store,
            verifier,
            audit,
            intake: IntakeOptions::default(),
            officer_id: DEFAULT_OFFICER_ID.to_string(),
        }
    }

    /// Override the default officer
    #[must_use]
    pub fn with_officer(mut self, officer_id: impl Into<String>) -> Self {
        self.officer_id = officer_id.into();
        self
    }

    /// Override intake normalization
    #[must_use]
    pub fn with_intake(mut self, intake: IntakeOptions) -> Self {
        self.intake = intake;
        self
    }

    /// Wire up a fresh in-memory store, the random verifier and the configured audit sink
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let policy = config.verifier.policy();
        let verifier = match config.verifier.seed {
            Some(seed) => RandomVerifier::seeded(policy, seed),
            None => RandomVerifier::new(policy),
        };

        let sink: Arc<dyn AuditSink> = match config.audit.sink {
            AuditSinkKind::Log => Arc::new(LogAuditSink::new()),
            AuditSinkKind::File => {
                let path = config
                    .audit
                    .path
                    .as_deref()
                    .context("audit.path is required for the file sink")?;
                Arc::new(LedgerFileSink::open(path)?)
            },
        };
        let audit: Arc<dyn AuditSink> = if config.audit.background {
            Arc::new(
                BackgroundAuditSink::spawn(sink).context("Failed to start audit worker")?,
            )
        } else {
            sink
        };

        log::debug!(
            "state ready: audit sink {} ({}), suspicion rate {}",
            config.audit.sink,
            if config.audit.background { "background" } else { "inline" },
            policy.suspicion_rate
        );

        Ok(Self::new(Arc::new(InMemoryCaseStore::new()), Arc::new(verifier), audit)
            .with_officer(config.review.officer_id.clone())
            .with_intake(IntakeOptions {
                default_beneficiary: config.intake.default_beneficiary.clone(),
            }))
    }
}
