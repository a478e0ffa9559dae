//! Shared utilities: trigram extraction, tokenization, edit distance, and
//! the bloom filter backing the trigram index.

pub mod bloom;
pub mod levenshtein;
pub mod tokenizer;
pub mod trigram;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as epoch milliseconds. Clock failures collapse to zero,
/// which downstream code treats as "no timestamp".
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
