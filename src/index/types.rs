use crate::query::scorer::ScoringWeights;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Document identifier: a path-like string key, shared cheaply between
/// posting lists and candidate sets.
pub type DocId = Arc<str>;

/// A trigram is a 3-byte sequence of lowercased content stored as u32
/// (only the lower 24 bits are used).
pub type Trigram = u32;

/// Storage tier for indexed documents.
///
/// The declaration order doubles as the priority order: `Hot < Warm < Cold`,
/// so tier comparison can be used directly for tie-breaking and compaction
/// eviction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// Recent commits, active branches.
    #[default]
    Hot,
    /// Historical code, archived branches.
    Warm,
    /// Legacy code, compliance archives.
    Cold,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Hot, Tier::Warm, Tier::Cold];

    /// Relevance boost applied to matches from this tier.
    pub fn boost(self) -> f64 {
        match self {
            Tier::Hot => 1.2,
            Tier::Warm => 1.0,
            Tier::Cold => 0.8,
        }
    }
}

/// Convert 3 bytes to a trigram
#[inline]
pub fn pack_trigram(b0: u8, b1: u8, b2: u8) -> Trigram {
    ((b0 as u32) << 16) | ((b1 as u32) << 8) | (b2 as u32)
}

/// Convert trigram back to bytes
#[inline]
pub fn trigram_bytes(t: Trigram) -> [u8; 3] {
    [
        ((t >> 16) & 0xFF) as u8,
        ((t >> 8) & 0xFF) as u8,
        (t & 0xFF) as u8,
    ]
}

/// Configuration for the indexing engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Interval between background compaction runs, in milliseconds.
    /// Zero disables the background task entirely.
    pub compaction_interval_ms: u64,
    /// Trigram posting lists larger than this are trimmed during compaction.
    pub max_posting_list: usize,
    /// Expected trigram vocabulary size, used to size the bloom filter.
    pub bloom_expected_trigrams: usize,
    /// Target false-positive rate for the bloom filter.
    pub bloom_false_positive_rate: f64,
    /// Files larger than this are rejected instead of indexed.
    pub max_file_size: u64,
    /// Scoring weights for search result ranking
    pub scoring: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            compaction_interval_ms: 300_000, // 5 minutes
            max_posting_list: 10_000,
            bloom_expected_trigrams: 1_000_000,
            bloom_false_positive_rate: 0.01,
            max_file_size: 100 * 1024 * 1024, // 100MB - matches GitHub's file size limit
            scoring: ScoringWeights::default(),
        }
    }
}

/// Options accepted by [`crate::IndexEngine::search`]
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Suffix filter on the document path, e.g. `".java"`
    pub file_type_filter: Option<String>,
    /// Regular expression matched anywhere in the document path
    pub path_filter: Option<String>,
    /// Maximum number of matches returned
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            file_type_filter: None,
            path_filter: None,
            max_results: 100,
        }
    }
}

/// Per-document snapshot taken at the last successful index call.
///
/// Used only to decide whether re-tokenization is needed (delta indexing);
/// removed together with the document, never expires on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMetadata {
    pub last_modified_ms: u64,
    pub size: u64,
    pub tier: Tier,
}

/// A single search result with partial scores and ranking metadata.
///
/// Created fresh for every query and discarded after the response; nothing
/// here is persisted. The final relevance score is computed on demand (see
/// [`crate::query::scorer::Scorer`]) so that compliance tags added after
/// matching still influence ranking.
#[derive(Debug, Clone)]
pub struct SearchMatch {
    /// Path-like document key
    pub doc_id: DocId,
    /// Coverage of the query's bloom-confirmed trigrams (0.0 for fuzzy hits)
    pub trigram_score: f64,
    /// Accumulated tf-idf score from the inverted index
    pub inverted_score: f64,
    /// Link-graph authority signal. Currently a configured placeholder;
    /// extension point for the surrounding system.
    pub authority_score: f64,
    pub tier: Tier,
    /// Source modification time (epoch milliseconds)
    pub last_modified_ms: u64,
    /// Query tokens that contributed to this match
    pub matched_tokens: Vec<String>,
    /// Set when any compliance tag is attached
    pub compliance_relevant: bool,
    pub compliance_tags: FxHashSet<String>,
    /// Context extracted around the match, if the caller attached content
    pub snippet: Option<String>,
}

impl SearchMatch {
    pub fn new(doc_id: DocId, tier: Tier, last_modified_ms: u64) -> Self {
        Self {
            doc_id,
            trigram_score: 0.0,
            inverted_score: 0.0,
            authority_score: 0.0,
            tier,
            last_modified_ms,
            matched_tokens: Vec::new(),
            compliance_relevant: false,
            compliance_tags: FxHashSet::default(),
            snippet: None,
        }
    }

    /// Tag this match as compliance-relevant. Tagged matches receive the
    /// compliance boost during ranking.
    pub fn add_compliance_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !tag.trim().is_empty() {
            self.compliance_tags.insert(tag.trim().to_string());
            self.compliance_relevant = true;
        }
    }

    /// Extract a snippet around the first line containing a matched token.
    ///
    /// The caller supplies the document content; the index itself never
    /// stores it. Output is capped at `max_len` bytes with a trailing
    /// ellipsis when truncated.
    pub fn attach_snippet(&mut self, content: &str, max_len: usize) {
        let lines: Vec<&str> = content.lines().collect();
        if lines.is_empty() {
            return;
        }

        let target = lines
            .iter()
            .position(|line| {
                let lower = line.to_lowercase();
                self.matched_tokens.iter().any(|t| lower.contains(t.as_str()))
            })
            .unwrap_or(0);

        let start = target.saturating_sub(2);
        let end = (target + 2).min(lines.len() - 1);

        let mut snippet = String::new();
        for line in &lines[start..=end] {
            if !snippet.is_empty() {
                snippet.push('\n');
            }
            if snippet.len() + line.len() > max_len {
                let budget = max_len.saturating_sub(snippet.len() + 3);
                let cut = line
                    .char_indices()
                    .map(|(i, _)| i)
                    .take_while(|&i| i <= budget)
                    .last()
                    .unwrap_or(0);
                if cut > 0 {
                    snippet.push_str(&line[..cut]);
                    snippet.push_str("...");
                }
                break;
            }
            snippet.push_str(line);
        }

        self.snippet = Some(snippet);
    }
}

/// Snapshot of trigram index statistics for monitoring.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrigramStats {
    /// Cumulative trigram postings added since startup
    pub total_trigrams: u64,
    /// Distinct trigrams with a live posting list
    pub unique_trigrams: usize,
    /// Documents currently indexed
    pub documents: usize,
    /// Candidate lookups served
    pub queries: u64,
    /// Mean posting-list length
    pub avg_posting_len: f64,
}
