//! Audit event seam.
//!
//! The engine reports every significant operation as a structured
//! [`AuditEvent`]; what happens to the events is the embedding system's
//! concern. The default sink renders them through `tracing` with a JSON
//! payload, so a subscriber installed by the application sees one record
//! per event.

use crate::index::types::Tier;
use serde::Serialize;

/// Structured events emitted by the engine. Failures are always reported;
/// nothing is silently swallowed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    DocumentIndexed {
        path: String,
        tier: Tier,
        elapsed_ms: u64,
    },
    DocumentIndexFailed {
        path: String,
        error: String,
    },
    RepositoryIndexingStarted {
        files: usize,
        tier: Tier,
    },
    RepositoryIndexingCompleted {
        total_files: usize,
        successful_files: usize,
        skipped_files: usize,
        elapsed_ms: u64,
    },
    RepositoryIndexingFailed {
        root: String,
        error: String,
    },
    SearchExecuted {
        query: String,
        results: usize,
        elapsed_ms: u64,
    },
    SearchFailed {
        query: String,
        error: String,
    },
    CompactionStarted,
    CompactionCompleted {
        elapsed_ms: u64,
    },
    CompactionFailed {
        error: String,
    },
    ShutdownStarted,
    ShutdownCompleted,
}

impl AuditEvent {
    /// Whether this event records a failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            AuditEvent::DocumentIndexFailed { .. }
                | AuditEvent::RepositoryIndexingFailed { .. }
                | AuditEvent::SearchFailed { .. }
                | AuditEvent::CompactionFailed { .. }
        )
    }
}

/// Receiver for audit events. Implementations must tolerate concurrent
/// calls; the engine never inspects a return value.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}

/// Default sink: one `tracing` record per event, failures at `warn`.
#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) {
        let payload = serde_json::to_string(event).unwrap_or_else(|_| format!("{event:?}"));
        if event.is_failure() {
            tracing::warn!(target: "syndex::audit", %payload);
        } else {
            tracing::info!(target: "syndex::audit", %payload);
        }
    }
}
