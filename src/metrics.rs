//! Metrics seam.
//!
//! The engine reports timings and counters through this trait; aggregation
//! (rates, percentiles, health rollups) belongs to the embedding system.
//! All methods have empty default bodies so a collaborator implements only
//! what it consumes.

use crate::index::types::Tier;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Exact,
    Fuzzy,
}

/// Receiver for engine measurements. Implementations must tolerate
/// concurrent calls.
pub trait MetricsSink: Send + Sync {
    /// One call per document indexing attempt, including failures.
    fn document_indexed(&self, _tier: Tier, _bytes: u64, _elapsed_ms: u64, _success: bool) {}

    /// One call per query served.
    fn query_executed(&self, _kind: QueryKind, _elapsed_ms: u64, _results: usize) {}

    /// One call per compaction run.
    fn compaction_finished(&self, _elapsed_ms: u64) {}
}

/// Sink that ignores every measurement.
#[derive(Debug, Default)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {}
