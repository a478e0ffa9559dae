//! Relevance model for search results.
//!
//! Each match carries independent partial scores (trigram coverage,
//! inverted-index tf-idf, authority). The final score combines them and
//! applies tier, recency, and compliance boosts:
//!
//! ```text
//! final = (trigram*0.3 + inverted*0.4 + authority*0.2)
//!         * tier_boost * recency_boost * compliance_boost
//! ```
//!
//! Ranking order: final score descending, then tier ascending (hot wins),
//! then last-modified descending. The comparison is built on
//! [`f64::total_cmp`], so it forms a strict total preorder usable by any
//! comparison sort.

use crate::index::types::SearchMatch;
use crate::utils::now_ms;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Configurable weights for the relevance model. Defaults follow the
/// documented formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub trigram_weight: f64,
    pub inverted_weight: f64,
    pub authority_weight: f64,
    /// Boost for documents modified within the last 30 days
    pub recent_30d_boost: f64,
    /// Boost for documents modified within the last 90 days
    pub recent_90d_boost: f64,
    /// Boost for matches carrying any compliance tag
    pub compliance_boost: f64,
    /// Authority score assigned to every match until a link-graph signal
    /// exists. Extension point, not a computed value.
    pub authority_placeholder: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            trigram_weight: 0.3,
            inverted_weight: 0.4,
            authority_weight: 0.2,
            recent_30d_boost: 1.05,
            recent_90d_boost: 1.02,
            compliance_boost: 1.1,
            authority_placeholder: 0.0,
        }
    }
}

/// Scorer computes final relevance scores and the ranking order.
///
/// The current time is captured at construction so a single query ranks
/// against one consistent clock.
pub struct Scorer {
    weights: ScoringWeights,
    now_ms: u64,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            now_ms: now_ms(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    #[cfg(test)]
    fn at_time(weights: ScoringWeights, now_ms: u64) -> Self {
        Self { weights, now_ms }
    }

    /// Combined relevance score for a match.
    pub fn final_score(&self, m: &SearchMatch) -> f64 {
        let text = m.trigram_score * self.weights.trigram_weight
            + m.inverted_score * self.weights.inverted_weight
            + m.authority_score * self.weights.authority_weight;

        text * m.tier.boost() * self.recency_boost(m.last_modified_ms) * self.compliance_boost(m)
    }

    /// Recently modified documents get a slight preference.
    fn recency_boost(&self, modified_ms: u64) -> f64 {
        if modified_ms == 0 || modified_ms > self.now_ms {
            return 1.0;
        }
        let age_days = (self.now_ms - modified_ms) / DAY_MS;
        if age_days <= 30 {
            self.weights.recent_30d_boost
        } else if age_days <= 90 {
            self.weights.recent_90d_boost
        } else {
            1.0
        }
    }

    fn compliance_boost(&self, m: &SearchMatch) -> f64 {
        if m.compliance_relevant {
            self.weights.compliance_boost
        } else {
            1.0
        }
    }

    /// Ranking comparison: score descending, tier ascending, recency
    /// descending.
    pub fn compare(&self, a: &SearchMatch, b: &SearchMatch) -> Ordering {
        self.final_score(b)
            .total_cmp(&self.final_score(a))
            .then_with(|| a.tier.cmp(&b.tier))
            .then_with(|| b.last_modified_ms.cmp(&a.last_modified_ms))
    }

    /// Sort matches into ranking order.
    pub fn rank(&self, matches: &mut [SearchMatch]) {
        matches.sort_by(|a, b| self.compare(a, b));
    }
}
