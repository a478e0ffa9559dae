//! Query-string tokenization.
//!
//! Quoted phrases are tokenized separately and contribute their inner words;
//! the unquoted remainder goes through the same splitter. Tokens shorter
//! than 2 characters are dropped and everything is lowercased.

use regex::Regex;
use std::sync::LazyLock;

const MIN_QUERY_TOKEN_LEN: usize = 2;

static QUOTED_PHRASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap());

/// Split a query into distinct normalized tokens, preserving first-seen
/// order for deterministic scoring loops.
pub fn parse_query(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for capture in QUOTED_PHRASE.captures_iter(query) {
        collect_words(&capture[1], &mut tokens);
    }

    let remainder = QUOTED_PHRASE.replace_all(query, " ");
    collect_words(&remainder, &mut tokens);

    tokens
}

/// Split on non-word characters, lowercase, and keep distinct tokens of
/// useful length.
fn collect_words(text: &str, out: &mut Vec<String>) {
    for word in text.split(|c: char| !c.is_alphanumeric() && c != '_') {
        if word.len() < MIN_QUERY_TOKEN_LEN {
            continue;
        }
        let word = word.to_lowercase();
        if !out.contains(&word) {
            out.push(word);
        }
    }
}
