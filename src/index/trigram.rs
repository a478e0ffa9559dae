//! Trigram posting-list index with bloom-filter pre-screening.
//!
//! The index maps each trigram to the set of documents containing it.
//! Candidate lookup intersects the posting lists of all query trigrams,
//! starting from the smallest list; the bloom filter rejects trigrams that
//! were never indexed before any posting list is touched.
//!
//! A reader/writer lock guards the whole structure: any number of candidate
//! lookups run concurrently, while document mutation and compaction take
//! exclusive access.

use crate::index::types::{DocId, EngineConfig, Tier, Trigram, TrigramStats};
use crate::utils::bloom::BloomFilter;
use crate::utils::now_ms;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicU64, Ordering};

/// One posting: a document known to contain the trigram.
#[derive(Debug, Clone, Copy)]
struct PostingEntry {
    tier: Tier,
    stamp_ms: u64,
}

#[derive(Debug, Default)]
struct PostingList {
    entries: FxHashMap<DocId, PostingEntry>,
}

impl PostingList {
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Trim to the `keep` highest-priority entries: hot tier first, then
    /// newest first.
    fn trim_to(&mut self, keep: usize) {
        if self.entries.len() <= keep {
            return;
        }
        let mut ranked: Vec<(DocId, PostingEntry)> = self.entries.drain().collect();
        ranked.sort_by(|a, b| {
            a.1.tier
                .cmp(&b.1.tier)
                .then(b.1.stamp_ms.cmp(&a.1.stamp_ms))
        });
        ranked.truncate(keep);
        self.entries = ranked.into_iter().collect();
    }
}

#[derive(Debug, Clone, Copy)]
struct DocRecord {
    tier: Tier,
    #[allow(dead_code)]
    indexed_at_ms: u64,
}

struct TrigramInner {
    postings: FxHashMap<Trigram, PostingList>,
    docs: FxHashMap<DocId, DocRecord>,
    bloom: BloomFilter,
    trigrams_added: u64,
}

/// Candidate documents for a query, with the trigram counts needed to derive
/// the trigram partial score.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    pub docs: FxHashSet<DocId>,
    /// Query trigrams that survived the bloom filter
    pub confirmed_trigrams: usize,
    /// Total query trigrams
    pub query_trigrams: usize,
}

impl CandidateSet {
    fn empty(confirmed: usize, total: usize) -> Self {
        Self {
            docs: FxHashSet::default(),
            confirmed_trigrams: confirmed,
            query_trigrams: total,
        }
    }

    /// Fraction of query trigrams confirmed present in the index.
    pub fn coverage(&self) -> f64 {
        if self.query_trigrams == 0 {
            0.0
        } else {
            self.confirmed_trigrams as f64 / self.query_trigrams as f64
        }
    }
}

pub struct TrigramIndex {
    inner: RwLock<TrigramInner>,
    queries: AtomicU64,
    max_posting_list: usize,
    bloom_expected: usize,
    bloom_fpr: f64,
}

impl TrigramIndex {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            inner: RwLock::new(TrigramInner {
                postings: FxHashMap::default(),
                docs: FxHashMap::default(),
                bloom: BloomFilter::new(
                    config.bloom_expected_trigrams,
                    config.bloom_false_positive_rate,
                ),
                trigrams_added: 0,
            }),
            queries: AtomicU64::new(0),
            max_posting_list: config.max_posting_list,
            bloom_expected: config.bloom_expected_trigrams,
            bloom_fpr: config.bloom_false_positive_rate,
        }
    }

    /// Index a document's trigram set, replacing any prior postings for the
    /// same document.
    pub fn add_document(&self, id: &DocId, trigrams: &FxHashSet<Trigram>, tier: Tier) {
        let stamp_ms = now_ms();
        let mut inner = self.inner.write();

        Self::remove_locked(&mut inner, id);

        inner.docs.insert(
            id.clone(),
            DocRecord {
                tier,
                indexed_at_ms: stamp_ms,
            },
        );

        for &trigram in trigrams {
            inner
                .postings
                .entry(trigram)
                .or_default()
                .entries
                .insert(id.clone(), PostingEntry { tier, stamp_ms });
            inner.bloom.insert(trigram);
        }
        inner.trigrams_added += trigrams.len() as u64;
    }

    /// Drop a document from every posting list. Returns whether the document
    /// was present.
    pub fn remove_document(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        Self::remove_locked(&mut inner, id)
    }

    fn remove_locked(inner: &mut TrigramInner, id: &str) -> bool {
        if inner.docs.remove(id).is_none() {
            return false;
        }
        inner.postings.retain(|_, list| {
            list.entries.remove(id);
            !list.entries.is_empty()
        });
        true
    }

    /// Find documents that may contain every query trigram.
    ///
    /// Trigrams rejected by the bloom filter are discarded up front. The
    /// intersection is seeded from the smallest surviving posting list and
    /// terminates as soon as it runs empty or a required trigram turns out
    /// to have no posting list at all.
    pub fn find_candidates(&self, query: &FxHashSet<Trigram>) -> CandidateSet {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let inner = self.inner.read();

        if query.is_empty() {
            return CandidateSet::empty(0, 0);
        }

        let confirmed: Vec<Trigram> = query
            .iter()
            .copied()
            .filter(|&t| inner.bloom.might_contain(t))
            .collect();
        if confirmed.is_empty() {
            return CandidateSet::empty(0, query.len());
        }

        // Seed from the smallest posting list to minimize intersection work.
        // A bloom false positive can leave a confirmed trigram without a
        // posting list; no document can then match all trigrams.
        let seed = confirmed
            .iter()
            .copied()
            .min_by_key(|t| inner.postings.get(t).map_or(0, PostingList::len));
        let Some(seed) = seed else {
            return CandidateSet::empty(confirmed.len(), query.len());
        };
        let Some(seed_list) = inner.postings.get(&seed) else {
            return CandidateSet::empty(confirmed.len(), query.len());
        };

        let mut candidates: FxHashSet<DocId> = seed_list.entries.keys().cloned().collect();

        for &trigram in confirmed.iter().filter(|&&t| t != seed) {
            let Some(list) = inner.postings.get(&trigram) else {
                return CandidateSet::empty(confirmed.len(), query.len());
            };
            candidates.retain(|doc| list.entries.contains_key(doc));
            if candidates.is_empty() {
                break;
            }
        }

        CandidateSet {
            docs: candidates,
            confirmed_trigrams: confirmed.len(),
            query_trigrams: query.len(),
        }
    }

    /// Trim oversized posting lists and rebuild the bloom filter from the
    /// surviving trigram set.
    ///
    /// Eviction priority is tier ascending then timestamp descending, so hot
    /// and recently indexed documents survive. The bloom filter supports no
    /// removal, so it is rebuilt rather than cleared incrementally.
    pub fn compact(&self) {
        let mut inner = self.inner.write();

        let cap = self.max_posting_list;
        for list in inner.postings.values_mut() {
            list.trim_to(cap);
        }
        inner.postings.retain(|_, list| !list.entries.is_empty());

        let mut bloom = BloomFilter::new(self.bloom_expected, self.bloom_fpr);
        for &trigram in inner.postings.keys() {
            bloom.insert(trigram);
        }
        inner.bloom = bloom;
    }

    pub fn stats(&self) -> TrigramStats {
        let inner = self.inner.read();
        let unique = inner.postings.len();
        let total_postings: usize = inner.postings.values().map(PostingList::len).sum();
        TrigramStats {
            total_trigrams: inner.trigrams_added,
            unique_trigrams: unique,
            documents: inner.docs.len(),
            queries: self.queries.load(Ordering::Relaxed),
            avg_posting_len: if unique == 0 {
                0.0
            } else {
                total_postings as f64 / unique as f64
            },
        }
    }

    /// Documents currently indexed in the given tier.
    pub fn documents_in_tier(&self, tier: Tier) -> Vec<DocId> {
        let inner = self.inner.read();
        inner
            .docs
            .iter()
            .filter(|(_, record)| record.tier == tier)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn document_count(&self) -> usize {
        self.inner.read().docs.len()
    }

    #[cfg(test)]
    fn posting_len(&self, trigram: Trigram) -> usize {
        self.inner
            .read()
            .postings
            .get(&trigram)
            .map_or(0, PostingList::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::trigram::extract_trigrams;
    use std::sync::Arc;

    fn index() -> TrigramIndex {
        TrigramIndex::new(&EngineConfig::default())
    }

    fn doc(id: &str) -> DocId {
        Arc::from(id)
    }

    #[test]
    fn candidates_require_every_trigram() {
        let idx = index();
        idx.add_document(&doc("a.rs"), &extract_trigrams("hello world"), Tier::Hot);
        idx.add_document(&doc("b.rs"), &extract_trigrams("hello there"), Tier::Hot);

        let result = idx.find_candidates(&extract_trigrams("world"));
        assert!(result.docs.contains("a.rs"));
        assert!(!result.docs.contains("b.rs"));

        let result = idx.find_candidates(&extract_trigrams("hello"));
        assert_eq!(result.docs.len(), 2);
    }

    #[test]
    fn unseen_trigrams_short_circuit() {
        let idx = index();
        idx.add_document(&doc("a.rs"), &extract_trigrams("hello"), Tier::Hot);

        let result = idx.find_candidates(&extract_trigrams("xyzzy"));
        assert!(result.docs.is_empty());
        assert_eq!(result.confirmed_trigrams, 0);
        assert!(result.query_trigrams > 0);
    }

    #[test]
    fn empty_query_yields_empty_set() {
        let idx = index();
        idx.add_document(&doc("a.rs"), &extract_trigrams("hello"), Tier::Hot);
        let result = idx.find_candidates(&FxHashSet::default());
        assert!(result.docs.is_empty());
        assert_eq!(result.coverage(), 0.0);
    }

    #[test]
    fn reindex_replaces_postings() {
        let idx = index();
        let id = doc("a.rs");
        idx.add_document(&id, &extract_trigrams("alpha"), Tier::Hot);
        idx.add_document(&id, &extract_trigrams("omega"), Tier::Hot);

        assert!(idx.find_candidates(&extract_trigrams("alpha")).docs.is_empty());
        assert!(idx.find_candidates(&extract_trigrams("omega")).docs.contains("a.rs"));
        assert_eq!(idx.document_count(), 1);
    }

    #[test]
    fn indexing_twice_is_idempotent() {
        let idx = index();
        let id = doc("a.rs");
        let trigrams = extract_trigrams("some stable content");
        idx.add_document(&id, &trigrams, Tier::Hot);
        let before = idx.stats();
        idx.add_document(&id, &trigrams, Tier::Hot);
        let after = idx.stats();

        assert_eq!(before.unique_trigrams, after.unique_trigrams);
        assert_eq!(before.documents, after.documents);
        assert_eq!(before.avg_posting_len, after.avg_posting_len);
    }

    #[test]
    fn removal_clears_every_posting() {
        let idx = index();
        let id = doc("a.rs");
        idx.add_document(&id, &extract_trigrams("disappearing act"), Tier::Hot);

        assert!(idx.remove_document("a.rs"));
        assert!(!idx.remove_document("a.rs"));
        assert_eq!(idx.document_count(), 0);
        assert_eq!(idx.stats().unique_trigrams, 0);
        assert!(idx.find_candidates(&extract_trigrams("disappearing")).docs.is_empty());
    }

    #[test]
    fn compaction_trims_lists_by_priority() {
        let config = EngineConfig {
            max_posting_list: 2,
            ..EngineConfig::default()
        };
        let idx = TrigramIndex::new(&config);
        let trigrams = extract_trigrams("shared");

        idx.add_document(&doc("cold.rs"), &trigrams, Tier::Cold);
        idx.add_document(&doc("warm.rs"), &trigrams, Tier::Warm);
        idx.add_document(&doc("hot.rs"), &trigrams, Tier::Hot);

        let sha = extract_trigrams("sha").into_iter().next().unwrap();
        assert_eq!(idx.posting_len(sha), 3);

        idx.compact();
        assert_eq!(idx.posting_len(sha), 2);

        // Hot and warm survive; the cold posting is evicted first.
        let result = idx.find_candidates(&extract_trigrams("shared"));
        assert!(result.docs.contains("hot.rs"));
        assert!(result.docs.contains("warm.rs"));
        assert!(!result.docs.contains("cold.rs"));
    }

    #[test]
    fn compaction_rebuilds_bloom_from_survivors() {
        let idx = index();
        idx.add_document(&doc("a.rs"), &extract_trigrams("ephemeral"), Tier::Hot);
        idx.remove_document("a.rs");
        idx.compact();

        // After the rebuild the filter rejects the removed content again.
        let result = idx.find_candidates(&extract_trigrams("ephemeral"));
        assert_eq!(result.confirmed_trigrams, 0);
    }

    #[test]
    fn stats_reflect_index_state() {
        let idx = index();
        idx.add_document(&doc("a.rs"), &extract_trigrams("abcd"), Tier::Hot);
        idx.find_candidates(&extract_trigrams("abc"));

        let stats = idx.stats();
        assert_eq!(stats.documents, 1);
        assert_eq!(stats.unique_trigrams, 2);
        assert_eq!(stats.queries, 1);
        assert!(stats.avg_posting_len > 0.0);
    }

    #[test]
    fn documents_in_tier_filters() {
        let idx = index();
        idx.add_document(&doc("hot.rs"), &extract_trigrams("abc"), Tier::Hot);
        idx.add_document(&doc("cold.rs"), &extract_trigrams("def"), Tier::Cold);

        let hot = idx.documents_in_tier(Tier::Hot);
        assert_eq!(hot.len(), 1);
        assert_eq!(&*hot[0], "hot.rs");
        assert!(idx.documents_in_tier(Tier::Warm).is_empty());
    }
}
