//! Indexing engine orchestration.
//!
//! The engine ties the trigram and inverted indexes together: it tokenizes
//! incoming documents, fans repository indexing out over a worker pool,
//! drives the search pipeline (candidates, precise scoring, filtering,
//! ranking), and runs compaction on a background interval.
//!
//! Concurrency model: file tasks within one repository run in parallel and
//! are joined before the aggregate result is visible; each index has its
//! own reader/writer lock; the background compactor takes the same
//! exclusive locks as document mutation, so it never overlaps an add or
//! remove.

pub mod repo;
pub mod source;

use crate::audit::{AuditEvent, AuditSink, TracingAuditSink};
use crate::error::EngineError;
use crate::index::inverted::InvertedIndex;
use crate::index::trigram::TrigramIndex;
use crate::index::types::{
    DocId, EngineConfig, IndexMetadata, SearchMatch, SearchOptions, Tier, TrigramStats,
};
use crate::metrics::{MetricsSink, NoopMetricsSink, QueryKind};
use crate::query::scorer::Scorer;
use crate::utils::now_ms;
use crate::utils::tokenizer;
use crate::utils::trigram::extract_trigrams;
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use repo::{FileIndexOutcome, RepoIndexOutcome};
use source::{FileSource, SourceFile};

/// Handle to the background compaction thread.
struct Compactor {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Aggregate view of engine state for the metrics collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub trigram: TrigramStats,
    pub documents: usize,
    pub vocabulary: usize,
}

/// The in-process code search engine.
///
/// Construct with [`IndexEngine::new`] (tracing audit sink, no-op metrics)
/// or [`IndexEngine::with_observers`] to wire in collaborators. Call
/// [`IndexEngine::shutdown`] for an orderly stop; dropping the engine stops
/// the background compactor without the final compaction pass.
pub struct IndexEngine {
    config: EngineConfig,
    trigram: Arc<TrigramIndex>,
    inverted: Arc<InvertedIndex>,
    /// Delta-indexing cache; entries live exactly as long as the document
    meta: RwLock<FxHashMap<DocId, IndexMetadata>>,
    audit: Arc<dyn AuditSink>,
    metrics: Arc<dyn MetricsSink>,
    compactor: Mutex<Option<Compactor>>,
}

impl IndexEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_observers(
            config,
            Arc::new(TracingAuditSink),
            Arc::new(NoopMetricsSink),
        )
    }

    pub fn with_observers(
        config: EngineConfig,
        audit: Arc<dyn AuditSink>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        let trigram = Arc::new(TrigramIndex::new(&config));
        let inverted = Arc::new(InvertedIndex::new());

        let compactor = if config.compaction_interval_ms > 0 {
            spawn_compactor(
                Duration::from_millis(config.compaction_interval_ms),
                Arc::clone(&trigram),
                Arc::clone(&inverted),
                Arc::clone(&audit),
                Arc::clone(&metrics),
            )
        } else {
            None
        };

        Self {
            config,
            trigram,
            inverted,
            meta: RwLock::new(FxHashMap::default()),
            audit,
            metrics,
            compactor: Mutex::new(compactor),
        }
    }

    /// Index a single document, replacing any previous content under the
    /// same id.
    pub fn index_document(&self, id: &str, content: &str, tier: Tier) -> Result<(), EngineError> {
        let started = Instant::now();
        let size = content.len() as u64;

        if size > self.config.max_file_size {
            let err = EngineError::DocumentTooLarge {
                path: id.to_string(),
                size,
                limit: self.config.max_file_size,
            };
            self.audit.record(&AuditEvent::DocumentIndexFailed {
                path: id.to_string(),
                error: err.to_string(),
            });
            self.metrics
                .document_indexed(tier, size, elapsed_ms(started), false);
            return Err(err);
        }

        self.index_parsed(id, content, tier, now_ms());

        self.audit.record(&AuditEvent::DocumentIndexed {
            path: id.to_string(),
            tier,
            elapsed_ms: elapsed_ms(started),
        });
        self.metrics
            .document_indexed(tier, size, elapsed_ms(started), true);
        Ok(())
    }

    /// Index a batch of already-loaded files in parallel.
    ///
    /// One task per file on the worker pool; every task finishes before the
    /// aggregate is returned. A single file failure is recorded in its
    /// [`FileIndexOutcome`] and never aborts the batch.
    pub fn index_repository(&self, files: &[SourceFile], tier: Tier) -> RepoIndexOutcome {
        self.audit.record(&AuditEvent::RepositoryIndexingStarted {
            files: files.len(),
            tier,
        });
        let started = Instant::now();

        let outcomes: Vec<FileIndexOutcome> = files
            .par_iter()
            .map(|file| self.index_source_file(file, tier))
            .collect();

        let outcome = RepoIndexOutcome::aggregate(outcomes, elapsed_ms(started));
        self.audit.record(&AuditEvent::RepositoryIndexingCompleted {
            total_files: outcome.total_files,
            successful_files: outcome.successful_files,
            skipped_files: outcome.skipped_files,
            elapsed_ms: outcome.elapsed_ms,
        });
        outcome
    }

    /// Enumerate files under `root` via the collaborator and index them.
    ///
    /// Enumeration failure is a repository-level error; individual read
    /// failures are isolated per file.
    pub fn index_repository_from(
        &self,
        source: &dyn FileSource,
        root: &Path,
        tier: Tier,
    ) -> Result<RepoIndexOutcome, EngineError> {
        let paths = match source.list_code_files(root) {
            Ok(paths) => paths,
            Err(err) => {
                self.audit.record(&AuditEvent::RepositoryIndexingFailed {
                    root: root.display().to_string(),
                    error: err.to_string(),
                });
                return Err(EngineError::Enumeration {
                    root: root.to_path_buf(),
                    source: err,
                });
            }
        };

        self.audit.record(&AuditEvent::RepositoryIndexingStarted {
            files: paths.len(),
            tier,
        });
        let started = Instant::now();

        let outcomes: Vec<FileIndexOutcome> = paths
            .par_iter()
            .map(|path| match source.read_file(path) {
                Ok(file) => self.index_source_file(&file, tier),
                Err(err) => {
                    let path = path.display().to_string();
                    self.audit.record(&AuditEvent::DocumentIndexFailed {
                        path: path.clone(),
                        error: err.to_string(),
                    });
                    FileIndexOutcome::failed(path, err.to_string())
                }
            })
            .collect();

        let outcome = RepoIndexOutcome::aggregate(outcomes, elapsed_ms(started));
        self.audit.record(&AuditEvent::RepositoryIndexingCompleted {
            total_files: outcome.total_files,
            successful_files: outcome.successful_files,
            skipped_files: outcome.skipped_files,
            elapsed_ms: outcome.elapsed_ms,
        });
        Ok(outcome)
    }

    /// Index one loaded file, honoring delta detection and the size limit.
    fn index_source_file(&self, file: &SourceFile, tier: Tier) -> FileIndexOutcome {
        let started = Instant::now();

        // Delta indexing: unchanged since the cached snapshot means no
        // re-tokenization. A skip is a success, not an error.
        if let Some(cached) = self.meta.read().get(file.path.as_str()) {
            if file.modified_ms <= cached.last_modified_ms {
                return FileIndexOutcome::skipped(file.path.clone());
            }
        }

        if file.size > self.config.max_file_size {
            let error = format!(
                "{} bytes exceeds the {} byte limit",
                file.size, self.config.max_file_size
            );
            self.audit.record(&AuditEvent::DocumentIndexFailed {
                path: file.path.clone(),
                error: error.clone(),
            });
            self.metrics
                .document_indexed(tier, file.size, elapsed_ms(started), false);
            return FileIndexOutcome::failed(file.path.clone(), error);
        }

        self.index_parsed(&file.path, &file.content, tier, file.modified_ms);
        self.metrics
            .document_indexed(tier, file.size, elapsed_ms(started), true);
        FileIndexOutcome::indexed(file.path.clone())
    }

    /// Tokenize and insert into both indexes. Each index replaces prior
    /// postings for the document before adding new ones, so no stale entry
    /// survives a reindex.
    fn index_parsed(&self, id: &str, content: &str, tier: Tier, modified_ms: u64) {
        let doc: DocId = Arc::from(id);
        let trigrams = extract_trigrams(content);
        let tokens = tokenizer::tokenize(content, id);

        self.trigram.add_document(&doc, &trigrams, tier);
        self.inverted.add_document(&doc, &tokens, tier, modified_ms);

        self.meta.write().insert(
            doc,
            IndexMetadata {
                last_modified_ms: modified_ms,
                size: content.len() as u64,
                tier,
            },
        );
    }

    /// Exact search: trigram candidates, tf-idf scoring, user filters,
    /// ranking, truncation.
    pub fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchMatch>, EngineError> {
        let started = Instant::now();

        let path_filter = match options.path_filter.as_deref().map(Regex::new).transpose() {
            Ok(filter) => filter,
            Err(err) => {
                self.audit.record(&AuditEvent::SearchFailed {
                    query: query.to_string(),
                    error: err.to_string(),
                });
                return Err(EngineError::InvalidPathFilter(err));
            }
        };

        let query_trigrams = extract_trigrams(query);
        let candidates = self.trigram.find_candidates(&query_trigrams);
        let mut matches = self.inverted.find_matches(query, &candidates.docs);

        let coverage = candidates.coverage();
        for m in &mut matches {
            m.trigram_score = coverage;
            m.authority_score = self.config.scoring.authority_placeholder;
        }

        matches.retain(|m| {
            passes_filters(m, options.file_type_filter.as_deref(), path_filter.as_ref())
        });

        let scorer = Scorer::new(self.config.scoring.clone());
        scorer.rank(&mut matches);
        matches.truncate(options.max_results);

        self.audit.record(&AuditEvent::SearchExecuted {
            query: query.to_string(),
            results: matches.len(),
            elapsed_ms: elapsed_ms(started),
        });
        self.metrics
            .query_executed(QueryKind::Exact, elapsed_ms(started), matches.len());
        Ok(matches)
    }

    /// Fuzzy search over the token vocabulary. Not trigram-prefiltered and
    /// not filtered; results are ranked like exact matches.
    pub fn fuzzy_search(&self, query: &str, max_distance: usize) -> Vec<SearchMatch> {
        let started = Instant::now();

        let mut matches = self.inverted.fuzzy_search(query, max_distance);
        for m in &mut matches {
            m.authority_score = self.config.scoring.authority_placeholder;
        }

        let scorer = Scorer::new(self.config.scoring.clone());
        scorer.rank(&mut matches);

        self.audit.record(&AuditEvent::SearchExecuted {
            query: query.to_string(),
            results: matches.len(),
            elapsed_ms: elapsed_ms(started),
        });
        self.metrics
            .query_executed(QueryKind::Fuzzy, elapsed_ms(started), matches.len());
        matches
    }

    /// Remove a document from both indexes and the delta cache. Returns
    /// whether the document was indexed.
    pub fn remove_document(&self, id: &str) -> bool {
        let in_trigram = self.trigram.remove_document(id);
        let in_inverted = self.inverted.remove_document(id);
        self.meta.write().remove(id);
        in_trigram || in_inverted
    }

    /// Compact both indexes immediately, independent of the background
    /// interval.
    pub fn compact(&self) {
        run_compaction(&self.trigram, &self.inverted, &self.audit, &self.metrics);
    }

    /// Orderly stop: halt the background compactor, then force a final
    /// compaction. In-flight indexing calls hold their own joins, so by the
    /// time callers observe the shutdown their work has drained.
    pub fn shutdown(&self) {
        self.audit.record(&AuditEvent::ShutdownStarted);
        self.stop_compactor();
        run_compaction(&self.trigram, &self.inverted, &self.audit, &self.metrics);
        self.audit.record(&AuditEvent::ShutdownCompleted);
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            trigram: self.trigram.stats(),
            documents: self.inverted.document_count(),
            vocabulary: self.inverted.vocabulary_size(),
        }
    }

    /// Documents currently indexed in the given tier.
    pub fn documents_in_tier(&self, tier: Tier) -> Vec<DocId> {
        self.trigram.documents_in_tier(tier)
    }

    fn stop_compactor(&self) {
        if let Some(compactor) = self.compactor.lock().take() {
            let _ = compactor.stop.send(());
            let _ = compactor.handle.join();
        }
    }
}

impl Drop for IndexEngine {
    fn drop(&mut self) {
        self.stop_compactor();
    }
}

fn spawn_compactor(
    interval: Duration,
    trigram: Arc<TrigramIndex>,
    inverted: Arc<InvertedIndex>,
    audit: Arc<dyn AuditSink>,
    metrics: Arc<dyn MetricsSink>,
) -> Option<Compactor> {
    let (stop, ticks) = mpsc::channel::<()>();
    let audit_outer = Arc::clone(&audit);

    let spawned = std::thread::Builder::new()
        .name("syndex-compactor".to_string())
        .spawn(move || loop {
            match ticks.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    run_compaction(&trigram, &inverted, &audit, &metrics);
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

    match spawned {
        Ok(handle) => Some(Compactor { stop, handle }),
        Err(err) => {
            // No background thread; on-demand compaction still works.
            audit_outer.record(&AuditEvent::CompactionFailed {
                error: format!("compactor thread not started: {err}"),
            });
            None
        }
    }
}

fn run_compaction(
    trigram: &TrigramIndex,
    inverted: &InvertedIndex,
    audit: &Arc<dyn AuditSink>,
    metrics: &Arc<dyn MetricsSink>,
) {
    audit.record(&AuditEvent::CompactionStarted);
    let started = Instant::now();

    trigram.compact();
    inverted.compact();

    let elapsed = elapsed_ms(started);
    audit.record(&AuditEvent::CompactionCompleted {
        elapsed_ms: elapsed,
    });
    metrics.compaction_finished(elapsed);
}

fn passes_filters(m: &SearchMatch, suffix: Option<&str>, path_filter: Option<&Regex>) -> bool {
    if let Some(suffix) = suffix {
        if !m.doc_id.to_lowercase().ends_with(&suffix.to_lowercase()) {
            return false;
        }
    }
    if let Some(filter) = path_filter {
        if !filter.is_match(&m.doc_id) {
            return false;
        }
    }
    true
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn engine() -> IndexEngine {
        let config = EngineConfig {
            compaction_interval_ms: 0,
            ..EngineConfig::default()
        };
        IndexEngine::new(config)
    }

    fn default_options() -> SearchOptions {
        SearchOptions::default()
    }

    #[test]
    fn index_then_search() {
        let engine = engine();
        engine
            .index_document("svc/OrderService.java", "public class OrderService {}", Tier::Hot)
            .unwrap();

        let matches = engine.search("OrderService", &default_options()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(&*matches[0].doc_id, "svc/OrderService.java");
        assert!(matches[0].trigram_score > 0.0);
    }

    #[test]
    fn search_unknown_term_is_empty() {
        let engine = engine();
        engine
            .index_document("a.java", "public class Account {}", Tier::Hot)
            .unwrap();
        assert!(engine.search("xyzzy", &default_options()).unwrap().is_empty());
    }

    #[test]
    fn reindex_makes_old_content_unsearchable() {
        let engine = engine();
        engine
            .index_document("a.java", "class AlphaWidget {}", Tier::Hot)
            .unwrap();
        engine
            .index_document("a.java", "class OmegaWidget {}", Tier::Hot)
            .unwrap();

        assert!(engine.search("AlphaWidget", &default_options()).unwrap().is_empty());
        assert_eq!(engine.search("OmegaWidget", &default_options()).unwrap().len(), 1);
    }

    #[test]
    fn remove_document_removes_everywhere() {
        let engine = engine();
        engine
            .index_document("gone.java", "class Vanishing {}", Tier::Hot)
            .unwrap();

        assert!(engine.remove_document("gone.java"));
        assert!(!engine.remove_document("gone.java"));
        assert!(engine.search("Vanishing", &default_options()).unwrap().is_empty());
        assert!(engine.fuzzy_search("Vanishing", 1).is_empty());
        assert_eq!(engine.stats().documents, 0);
    }

    #[test]
    fn oversized_document_is_rejected() {
        let config = EngineConfig {
            compaction_interval_ms: 0,
            max_file_size: 16,
            ..EngineConfig::default()
        };
        let engine = IndexEngine::new(config);

        let err = engine
            .index_document("big.java", "class FarTooLargeForTheLimit {}", Tier::Hot)
            .unwrap_err();
        assert!(matches!(err, EngineError::DocumentTooLarge { .. }));
        assert_eq!(engine.stats().documents, 0);
    }

    #[test]
    fn repository_indexing_joins_all_files() {
        let engine = engine();
        let files: Vec<SourceFile> = (0..32)
            .map(|i| {
                SourceFile::from_content(
                    format!("src/file{i}.rs"),
                    format!("fn handler{i}() {{ process(); }}"),
                    100,
                )
            })
            .collect();

        let outcome = engine.index_repository(&files, Tier::Warm);
        assert_eq!(outcome.total_files, 32);
        assert_eq!(outcome.successful_files, 32);
        assert_eq!(outcome.skipped_files, 0);
        assert_eq!(engine.stats().documents, 32);
    }

    #[test]
    fn delta_indexing_skips_unchanged_files() {
        let engine = engine();
        let files = vec![SourceFile::from_content("a.rs", "fn alpha() {}", 1000)];

        let first = engine.index_repository(&files, Tier::Hot);
        assert_eq!(first.skipped_files, 0);

        // Same mtime: skipped, still a success
        let second = engine.index_repository(&files, Tier::Hot);
        assert_eq!(second.skipped_files, 1);
        assert_eq!(second.successful_files, 1);

        // Newer mtime: reindexed
        let updated = vec![SourceFile::from_content("a.rs", "fn beta() {}", 2000)];
        let third = engine.index_repository(&updated, Tier::Hot);
        assert_eq!(third.skipped_files, 0);
        assert_eq!(engine.search("beta", &default_options()).unwrap().len(), 1);
    }

    #[test]
    fn oversized_file_failure_does_not_abort_siblings() {
        let config = EngineConfig {
            compaction_interval_ms: 0,
            max_file_size: 64,
            ..EngineConfig::default()
        };
        let engine = IndexEngine::new(config);

        let files = vec![
            SourceFile::from_content("ok.rs", "fn compact_enough() {}", 1),
            SourceFile::from_content("big.rs", "x".repeat(200), 1),
        ];
        let outcome = engine.index_repository(&files, Tier::Hot);

        assert_eq!(outcome.total_files, 2);
        assert_eq!(outcome.successful_files, 1);
        let failed: Vec<&str> = outcome.failed_files().map(|f| f.path.as_str()).collect();
        assert_eq!(failed, vec!["big.rs"]);
        assert_eq!(engine.search("compact_enough", &default_options()).unwrap().len(), 1);
    }

    /// Source where some paths fail to read.
    struct FlakySource;

    impl FileSource for FlakySource {
        fn list_code_files(&self, _root: &Path) -> io::Result<Vec<PathBuf>> {
            Ok(vec![PathBuf::from("good.rs"), PathBuf::from("bad.rs")])
        }

        fn read_file(&self, path: &Path) -> io::Result<SourceFile> {
            if path.ends_with("bad.rs") {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
            } else {
                Ok(SourceFile::from_content(
                    path.display().to_string(),
                    "fn reachable() {}",
                    1,
                ))
            }
        }
    }

    struct BrokenSource;

    impl FileSource for BrokenSource {
        fn list_code_files(&self, _root: &Path) -> io::Result<Vec<PathBuf>> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such root"))
        }

        fn read_file(&self, _path: &Path) -> io::Result<SourceFile> {
            unreachable!("never called when enumeration fails")
        }
    }

    #[test]
    fn read_failure_is_isolated_to_its_file() {
        let engine = engine();
        let outcome = engine
            .index_repository_from(&FlakySource, Path::new("/repo"), Tier::Hot)
            .unwrap();

        assert_eq!(outcome.total_files, 2);
        assert_eq!(outcome.successful_files, 1);
        let failure = outcome.failed_files().next().unwrap();
        assert_eq!(failure.path, "bad.rs");
        assert!(failure.error.as_deref().unwrap().contains("locked"));
    }

    #[test]
    fn enumeration_failure_is_repository_level() {
        let engine = engine();
        let err = engine
            .index_repository_from(&BrokenSource, Path::new("/missing"), Tier::Hot)
            .unwrap_err();
        assert!(matches!(err, EngineError::Enumeration { .. }));
    }

    #[test]
    fn invalid_path_filter_is_an_error() {
        let engine = engine();
        engine
            .index_document("a.java", "class Account {}", Tier::Hot)
            .unwrap();

        let options = SearchOptions {
            path_filter: Some("[unclosed".to_string()),
            ..SearchOptions::default()
        };
        let err = engine.search("Account", &options).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPathFilter(_)));
    }

    #[test]
    fn file_type_filter_matches_suffix() {
        let engine = engine();
        engine
            .index_document("svc/Handler.java", "class RequestHandler {}", Tier::Hot)
            .unwrap();
        engine
            .index_document("svc/handler.py", "class RequestHandler: pass", Tier::Hot)
            .unwrap();

        let options = SearchOptions {
            file_type_filter: Some(".java".to_string()),
            ..SearchOptions::default()
        };
        let matches = engine.search("RequestHandler", &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].doc_id.ends_with(".java"));
    }

    #[test]
    fn path_filter_is_a_regex() {
        let engine = engine();
        engine
            .index_document("core/engine.rs", "fn ignite() {}", Tier::Hot)
            .unwrap();
        engine
            .index_document("tests/engine.rs", "fn ignite() {}", Tier::Hot)
            .unwrap();

        let options = SearchOptions {
            path_filter: Some("^core/".to_string()),
            ..SearchOptions::default()
        };
        let matches = engine.search("ignite", &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(&*matches[0].doc_id, "core/engine.rs");
    }

    #[test]
    fn max_results_truncates_after_ranking() {
        let engine = engine();
        for i in 0..10 {
            engine
                .index_document(
                    &format!("file{i}.rs"),
                    "fn shared_symbol() {}",
                    if i == 0 { Tier::Hot } else { Tier::Cold },
                )
                .unwrap();
        }

        let options = SearchOptions {
            max_results: 3,
            ..SearchOptions::default()
        };
        let matches = engine.search("shared_symbol", &options).unwrap();
        assert_eq!(matches.len(), 3);
        // The hot document survives truncation.
        assert_eq!(matches[0].tier, Tier::Hot);
    }

    #[test]
    fn compaction_runs_on_demand_and_at_shutdown() {
        let engine = engine();
        engine
            .index_document("a.rs", "fn alive() {}", Tier::Hot)
            .unwrap();
        engine.compact();
        engine.shutdown();
        assert_eq!(engine.search("alive", &default_options()).unwrap().len(), 1);
    }

    #[test]
    fn background_compactor_stops_cleanly() {
        let config = EngineConfig {
            compaction_interval_ms: 50,
            ..EngineConfig::default()
        };
        let engine = IndexEngine::new(config);
        engine
            .index_document("a.rs", "fn tick() {}", Tier::Hot)
            .unwrap();
        std::thread::sleep(Duration::from_millis(120));
        engine.shutdown();
        assert_eq!(engine.search("tick", &default_options()).unwrap().len(), 1);
    }

    #[test]
    fn documents_in_tier_reflects_indexing() {
        let engine = engine();
        engine
            .index_document("hot.rs", "fn a() {}", Tier::Hot)
            .unwrap();
        engine
            .index_document("cold.rs", "fn b() {}", Tier::Cold)
            .unwrap();

        assert_eq!(engine.documents_in_tier(Tier::Hot).len(), 1);
        assert_eq!(engine.documents_in_tier(Tier::Cold).len(), 1);
        assert!(engine.documents_in_tier(Tier::Warm).is_empty());
    }
}
