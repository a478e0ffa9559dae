//! # Syndex - Embeddable Code Search Engine
//!
//! Syndex is an in-process code search engine for indexing services. It
//! ingests `(path, content)` pairs, builds a trigram index for coarse
//! candidate filtering and an inverted token index for precise tf-idf
//! matching, and answers exact and fuzzy queries with tier-aware,
//! recency-aware ranking.
//!
//! ## Architecture
//!
//! - [`index`] - The two indexes: trigram posting lists behind a bloom
//!   pre-filter, and the inverted token index with tf-idf and fuzzy search
//! - [`query`] - Query tokenization and the relevance/ranking model
//! - [`engine`] - Orchestration: delta indexing, the parallel repository
//!   pipeline, the search pipeline, background compaction
//! - [`audit`] / [`metrics`] - Collaborator seams for audit logging and
//!   measurements
//! - [`utils`] - Trigram extraction, tokenizer, edit distance, bloom filter
//!
//! ## Quick Start
//!
//! ```no_run
//! use syndex::{EngineConfig, IndexEngine, SearchOptions, Tier};
//!
//! let engine = IndexEngine::new(EngineConfig::default());
//!
//! engine.index_document(
//!     "src/UserService.java",
//!     "public class UserService { User findUserById(Long id) { return null; } }",
//!     Tier::Hot,
//! )?;
//!
//! for hit in engine.search("findUserById", &SearchOptions::default())? {
//!     println!("{}", hit.doc_id);
//! }
//!
//! engine.shutdown();
//! # Ok::<(), syndex::EngineError>(())
//! ```
//!
//! ## Scope
//!
//! The index lives in memory only: no persistence across restarts, no
//! sharding, no AST-aware parsing, and no query authentication. Filesystem
//! traversal, audit semantics, and metrics aggregation belong to
//! collaborators behind the [`engine::source::FileSource`],
//! [`audit::AuditSink`], and [`metrics::MetricsSink`] seams.

pub mod audit;
pub mod engine;
pub mod error;
pub mod index;
pub mod metrics;
pub mod query;
pub mod utils;

pub use audit::{AuditEvent, AuditSink, NullAuditSink, TracingAuditSink};
pub use engine::repo::{FileIndexOutcome, RepoIndexOutcome};
pub use engine::source::{FileSource, FsFileSource, SourceFile};
pub use engine::{EngineStats, IndexEngine};
pub use error::EngineError;
pub use index::types::{
    DocId, EngineConfig, SearchMatch, SearchOptions, Tier, TrigramStats,
};
pub use metrics::{MetricsSink, NoopMetricsSink, QueryKind};
pub use query::scorer::{Scorer, ScoringWeights};
