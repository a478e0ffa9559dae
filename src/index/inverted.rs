//! Inverted token index with tf-idf scoring and edit-distance fuzzy search.
//!
//! Exact matching is the precise second pass after coarse trigram filtering:
//! only documents in the supplied candidate set accumulate score. Fuzzy
//! matching scans the whole token vocabulary per query token and weights
//! each hit by string similarity; no candidate restriction applies there.
//!
//! Like the trigram index, the whole structure sits behind one
//! reader/writer lock: concurrent searches share the read side, mutation
//! and compaction take the write side.

use crate::index::types::{DocId, SearchMatch, Tier};
use crate::query::parser::parse_query;
use crate::utils::levenshtein::bounded_edit_distance;
use crate::utils::now_ms;
use crate::utils::tokenizer::MIN_TOKEN_LEN;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

/// Additive smoothing applied to document frequency in the idf denominator.
const IDF_SMOOTHING: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
struct TokenEntry {
    frequency: u32,
    #[allow(dead_code)]
    tier: Tier,
    #[allow(dead_code)]
    stamp_ms: u64,
}

#[derive(Debug, Default)]
struct TokenPostings {
    entries: FxHashMap<DocId, TokenEntry>,
}

#[derive(Debug, Clone, Copy)]
struct DocRecord {
    tier: Tier,
    modified_ms: u64,
    #[allow(dead_code)]
    token_count: usize,
}

#[derive(Default)]
struct InvertedInner {
    postings: FxHashMap<String, TokenPostings>,
    docs: FxHashMap<DocId, DocRecord>,
}

#[derive(Default)]
pub struct InvertedIndex {
    inner: RwLock<InvertedInner>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document's token occurrences, replacing any prior postings
    /// for the same document.
    ///
    /// `tokens` is a multiset; per-token frequency is the occurrence count
    /// within it. `modified_ms` is the source modification time reported in
    /// matches and used by recency boosting.
    pub fn add_document(&self, id: &DocId, tokens: &[String], tier: Tier, modified_ms: u64) {
        let stamp_ms = now_ms();
        let mut inner = self.inner.write();

        Self::remove_locked(&mut inner, id);

        inner.docs.insert(
            id.clone(),
            DocRecord {
                tier,
                modified_ms,
                token_count: tokens.len(),
            },
        );

        let mut frequencies: FxHashMap<&str, u32> = FxHashMap::default();
        for token in tokens {
            *frequencies.entry(token.as_str()).or_insert(0) += 1;
        }

        for (token, frequency) in frequencies {
            if token.len() < MIN_TOKEN_LEN {
                continue;
            }
            inner
                .postings
                .entry(token.to_string())
                .or_default()
                .entries
                .insert(
                    id.clone(),
                    TokenEntry {
                        frequency,
                        tier,
                        stamp_ms,
                    },
                );
        }
    }

    /// Drop a document from every token posting list. Returns whether the
    /// document was present.
    pub fn remove_document(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        Self::remove_locked(&mut inner, id)
    }

    fn remove_locked(inner: &mut InvertedInner, id: &str) -> bool {
        if inner.docs.remove(id).is_none() {
            return false;
        }
        inner.postings.retain(|_, list| {
            list.entries.remove(id);
            !list.entries.is_empty()
        });
        true
    }

    /// Score candidate documents against the query with tf-idf.
    ///
    /// Only documents present in `candidates` accumulate score; the trigram
    /// index supplies that set. Matches come back sorted by accumulated
    /// score descending (doc id breaks exact ties for determinism).
    pub fn find_matches(&self, query: &str, candidates: &FxHashSet<DocId>) -> Vec<SearchMatch> {
        let inner = self.inner.read();
        let query_tokens = parse_query(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let total_docs = inner.docs.len() as f64;
        let mut scores: FxHashMap<DocId, f64> = FxHashMap::default();
        let mut matched: FxHashMap<DocId, Vec<String>> = FxHashMap::default();

        for token in &query_tokens {
            let Some(list) = inner.postings.get(token) else {
                continue;
            };
            let idf = idf(total_docs, list.entries.len());
            for (doc, entry) in &list.entries {
                if !candidates.contains(doc) {
                    continue;
                }
                let contribution = tf(entry.frequency) * idf;
                *scores.entry(doc.clone()).or_insert(0.0) += contribution;
                matched.entry(doc.clone()).or_default().push(token.clone());
            }
        }

        Self::materialize(&inner, scores, &mut matched)
    }

    /// Approximate matching over the whole vocabulary.
    ///
    /// Each index token within `max_distance` edits of a query token scores
    /// its documents with tf-idf weighted by a similarity factor
    /// `1 - distance / max(len)`. Cost grows with vocabulary size; accepted
    /// as a deliberate simplicity trade-off.
    pub fn fuzzy_search(&self, query: &str, max_distance: usize) -> Vec<SearchMatch> {
        let inner = self.inner.read();
        let query_tokens = parse_query(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let total_docs = inner.docs.len() as f64;
        let mut scores: FxHashMap<DocId, f64> = FxHashMap::default();
        let mut matched: FxHashMap<DocId, Vec<String>> = FxHashMap::default();

        for query_token in &query_tokens {
            for (token, list) in &inner.postings {
                let Some(distance) = bounded_edit_distance(query_token, token, max_distance)
                else {
                    continue;
                };
                let similarity = similarity_factor(query_token, token, distance);
                let idf = idf(total_docs, list.entries.len());

                for (doc, entry) in &list.entries {
                    let contribution = tf(entry.frequency) * idf * similarity;
                    *scores.entry(doc.clone()).or_insert(0.0) += contribution;
                    matched.entry(doc.clone()).or_default().push(token.clone());
                }
            }
        }

        Self::materialize(&inner, scores, &mut matched)
    }

    /// Drop zero-frequency postings and empty token lists. Zero frequencies
    /// should not occur under the remove-then-insert discipline; this is a
    /// consistency backstop.
    pub fn compact(&self) {
        let mut inner = self.inner.write();
        inner.postings.retain(|_, list| {
            list.entries.retain(|_, entry| entry.frequency > 0);
            !list.entries.is_empty()
        });
    }

    pub fn document_count(&self) -> usize {
        self.inner.read().docs.len()
    }

    /// Number of distinct tokens with a live posting list.
    pub fn vocabulary_size(&self) -> usize {
        self.inner.read().postings.len()
    }

    fn materialize(
        inner: &InvertedInner,
        scores: FxHashMap<DocId, f64>,
        matched: &mut FxHashMap<DocId, Vec<String>>,
    ) -> Vec<SearchMatch> {
        let mut matches: Vec<SearchMatch> = scores
            .into_iter()
            .filter_map(|(doc, score)| {
                let record = inner.docs.get(&doc)?;
                let mut m = SearchMatch::new(doc.clone(), record.tier, record.modified_ms);
                m.inverted_score = score;
                if let Some(tokens) = matched.remove(&doc) {
                    m.matched_tokens = tokens;
                }
                Some(m)
            })
            .collect();

        matches.sort_by(|a, b| {
            b.inverted_score
                .total_cmp(&a.inverted_score)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        matches
    }
}

/// Log-normalized term frequency.
fn tf(frequency: u32) -> f64 {
    1.0 + f64::from(frequency.max(1)).ln()
}

/// Smoothed inverse document frequency, floored at zero so a token's score
/// contribution is monotone in its in-document frequency.
fn idf(total_docs: f64, document_frequency: usize) -> f64 {
    if total_docs <= 0.0 {
        return 0.0;
    }
    (total_docs / (document_frequency as f64 + IDF_SMOOTHING))
        .ln()
        .max(0.0)
}

/// Similarity weight for a fuzzy hit: 1.0 for an exact match, decaying with
/// edit distance relative to the longer string.
fn similarity_factor(query_token: &str, token: &str, distance: usize) -> f64 {
    if distance == 0 {
        return 1.0;
    }
    let max_len = query_token.chars().count().max(token.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - distance as f64 / max_len as f64
}
