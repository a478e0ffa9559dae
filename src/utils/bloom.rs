//! Bloom filter used for negative pre-screening of query trigrams.
//!
//! Membership is monotonic: once a trigram is inserted it is always reported
//! present, so a negative answer is definitive. The filter supports no
//! removal; the trigram index rebuilds it from scratch during compaction.

use ahash::RandomState;
use std::hash::{BuildHasher, Hasher};

/// k-hash bloom filter over packed trigrams.
#[derive(Clone, Debug)]
pub struct BloomFilter {
    words: Vec<u64>,
    num_bits: usize,
    num_hashes: u8,
}

impl BloomFilter {
    /// Size the filter for `expected_items` insertions at the given target
    /// false-positive rate.
    ///
    /// Uses the standard formulas `m = -n ln(p) / ln(2)^2` and
    /// `k = (m/n) ln(2)`, with the bit count rounded up to a whole word.
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Self {
        let n = expected_items.max(1) as f64;
        let p = false_positive_rate.clamp(0.0001, 0.5);
        let ln2 = std::f64::consts::LN_2;

        let ideal_bits = ((-n * p.ln()) / (ln2 * ln2)).ceil() as usize;
        let num_words = ideal_bits.max(64).div_ceil(64);
        let num_bits = num_words * 64;

        let num_hashes = (((num_bits as f64 / n) * ln2).round() as u8).clamp(1, 16);

        Self {
            words: vec![0u64; num_words],
            num_bits,
            num_hashes,
        }
    }

    /// Mark a trigram as present.
    #[inline]
    pub fn insert(&mut self, item: u32) {
        let (h1, h2) = hash_pair(item);
        for i in 0..self.num_hashes as u64 {
            let bit = (h1.wrapping_add(i.wrapping_mul(h2)) as usize) % self.num_bits;
            self.words[bit / 64] |= 1u64 << (bit % 64);
        }
    }

    /// Membership test: `false` means definitely absent, `true` means
    /// present up to the configured false-positive rate.
    #[inline]
    pub fn might_contain(&self, item: u32) -> bool {
        let (h1, h2) = hash_pair(item);
        for i in 0..self.num_hashes as u64 {
            let bit = (h1.wrapping_add(i.wrapping_mul(h2)) as usize) % self.num_bits;
            if self.words[bit / 64] & (1u64 << (bit % 64)) == 0 {
                return false;
            }
        }
        true
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn num_hashes(&self) -> u8 {
        self.num_hashes
    }

    /// Approximate heap footprint in bytes.
    pub fn memory_usage(&self) -> usize {
        self.words.len() * 8
    }
}

/// Two independent hash values for double hashing: `h(i) = h1 + i*h2`.
///
/// Each value comes from its own seeded hasher; reusing one hasher after
/// `finish()` corrupts the distribution and inflates the false-positive rate.
#[inline]
fn hash_pair(item: u32) -> (u64, u64) {
    let mut hasher1 = RandomState::with_seeds(0, 0, 0, 0).build_hasher();
    hasher1.write_u32(item);

    let mut hasher2 = RandomState::with_seeds(
        0x517cc1b727220a95,
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
    )
    .build_hasher();
    hasher2.write_u32(item);

    (hasher1.finish(), hasher2.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_false_negatives() {
        let mut bf = BloomFilter::new(1000, 0.01);
        for i in 0..500u32 {
            bf.insert(i * 7);
        }
        for i in 0..500u32 {
            assert!(bf.might_contain(i * 7), "inserted item {} missing", i * 7);
        }
    }

    #[test]
    fn false_positive_rate_near_target() {
        let target = 0.01;
        let inserted = 10_000u32;
        let probed = 100_000u32;

        let mut bf = BloomFilter::new(inserted as usize, target);
        for i in 0..inserted {
            bf.insert(i);
        }

        let false_positives = (inserted * 2..inserted * 2 + probed)
            .filter(|&i| bf.might_contain(i))
            .count();
        let rate = false_positives as f64 / probed as f64;

        // 3x tolerance for statistical variance
        assert!(rate <= target * 3.0, "false positive rate too high: {rate:.4}");
        // A working filter should also produce *some* false positives
        assert!(rate >= target * 0.1, "suspiciously low rate: {rate:.4}");
    }

    #[test]
    fn sizing_scales_with_expected_items() {
        let small = BloomFilter::new(100, 0.01);
        let large = BloomFilter::new(100_000, 0.01);
        assert!(large.num_bits() > small.num_bits());
        assert!(small.num_hashes() >= 1);
    }

    #[test]
    fn hash_pair_values_are_independent() {
        for i in 0..1000u32 {
            let (h1, h2) = hash_pair(i);
            assert_ne!(h1, h2, "h1 == h2 for item {i}");
        }
    }

    #[test]
    fn empty_filter_rejects_everything() {
        let bf = BloomFilter::new(1000, 0.01);
        assert!(!bf.might_contain(0x616263));
        assert!(!bf.might_contain(0));
    }
}
