//! Source-code tokenizer with lightweight language detection.
//!
//! Tokenization runs in stages: detect the language, strip string literals
//! and comments, then collect keyword hits, generic identifiers, camelCase
//! and snake_case fragments, and operator symbols. All surviving tokens are
//! lowercased; tokens shorter than 2 characters or purely numeric are
//! dropped.

use crate::index::types::{pack_trigram, Trigram};
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Minimum length for an indexable token.
pub const MIN_TOKEN_LEN: usize = 2;

/// Languages the tokenizer can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Java,
    JavaScript,
    TypeScript,
    Python,
    Cpp,
    C,
    CSharp,
    #[default]
    Unknown,
}

impl Lang {
    /// Map a file extension to a language, if the extension is recognized.
    pub fn from_extension(ext: &str) -> Option<Lang> {
        match ext.to_lowercase().as_str() {
            "java" => Some(Lang::Java),
            "js" | "jsx" => Some(Lang::JavaScript),
            "ts" | "tsx" => Some(Lang::TypeScript),
            "py" => Some(Lang::Python),
            "cpp" | "cc" | "cxx" | "c++" => Some(Lang::Cpp),
            // Headers are assumed to be C++
            "h" | "hpp" => Some(Lang::Cpp),
            "cs" => Some(Lang::CSharp),
            "c" => Some(Lang::C),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Java => "java",
            Lang::JavaScript => "javascript",
            Lang::TypeScript => "typescript",
            Lang::Python => "python",
            Lang::Cpp => "cpp",
            Lang::C => "c",
            Lang::CSharp => "csharp",
            Lang::Unknown => "unknown",
        }
    }

    fn keywords(self) -> Option<&'static FxHashSet<&'static str>> {
        match self {
            Lang::Java => Some(&JAVA_KEYWORDS),
            Lang::JavaScript => Some(&JAVASCRIPT_KEYWORDS),
            Lang::Python => Some(&PYTHON_KEYWORDS),
            _ => None,
        }
    }
}

static JAVA_KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
        "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
        "interface", "long", "native", "new", "package", "private", "protected", "public",
        "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
        "throw", "throws", "transient", "try", "void", "volatile", "while",
    ]
    .into_iter()
    .collect()
});

static JAVASCRIPT_KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
        "instanceof", "let", "new", "return", "super", "switch", "this", "throw", "try",
        "typeof", "var", "void", "while", "with", "yield", "async", "await",
    ]
    .into_iter()
    .collect()
});

static PYTHON_KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "False", "None", "True", "and", "as", "assert", "break", "class", "continue", "def",
        "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
        "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
        "while", "with", "yield", "async", "await",
    ]
    .into_iter()
    .collect()
});

/// Words too generic to be worth indexing as identifiers: articles, CRUD
/// verbs, scratch names.
static STOP_WORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in",
        "is", "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "get",
        "set", "add", "remove", "delete", "create", "update", "find", "search", "list",
        "item", "data", "info", "temp", "tmp", "test", "demo", "example", "sample",
    ]
    .into_iter()
    .collect()
});

/// Operator symbols recognized verbatim in content. Single-character
/// operators never survive the minimum-length filter but are listed for
/// completeness with the multi-character forms.
const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "==", "!=", "<", ">", "<=", ">=", "&&", "||", "!", "&", "|",
    "^", "<<", ">>", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
];

/// Per-language structural patterns for content-based detection.
static DETECTORS: LazyLock<Vec<(Lang, Regex)>> = LazyLock::new(|| {
    vec![
        (
            Lang::Java,
            Regex::new(r"\b(public|private|protected|class|interface|extends|implements)\b")
                .unwrap(),
        ),
        (
            Lang::JavaScript,
            Regex::new(r"\b(function|var|let|const|require)\b|=>|module\.exports").unwrap(),
        ),
        (
            Lang::Python,
            Regex::new(r"\b(def|class|import|from)\b|if __name__|self\.").unwrap(),
        ),
        (
            Lang::Cpp,
            Regex::new(r"#include|\b(namespace|using|template|typename)\b|std::").unwrap(),
        ),
        (
            Lang::CSharp,
            Regex::new(r"\b(using|namespace|public|private|class|interface|var)\b").unwrap(),
        ),
        (
            Lang::TypeScript,
            Regex::new(r"\b(interface|type|export|import|declare|namespace)\b").unwrap(),
        ),
    ]
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

static STRING_LITERALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\\]|\\.)*"|'([^'\\]|\\.)*'"#).unwrap());

static COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").unwrap());

/// Detect the language of a source file: extension first, then content
/// patterns. Any tie between pattern scores (including all-zero) resolves
/// to [`Lang::Unknown`].
pub fn detect_language(content: &str, path_hint: &str) -> Lang {
    if let Some(lang) = extension_of(path_hint).and_then(Lang::from_extension) {
        return lang;
    }

    let mut best = Lang::Unknown;
    let mut best_score = 0usize;
    let mut tied = false;
    for (lang, pattern) in DETECTORS.iter() {
        let score = pattern.find_iter(content).count();
        if score > best_score {
            best = *lang;
            best_score = score;
            tied = false;
        } else if score == best_score && score > 0 {
            tied = true;
        }
    }

    if best_score == 0 || tied {
        Lang::Unknown
    } else {
        best
    }
}

fn extension_of(path: &str) -> Option<&str> {
    let name = path.rsplit(['/', '\\']).next()?;
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Tokenize source content into normalized token occurrences.
///
/// The result is a multiset: the same token appears once per occurrence, so
/// the inverted index can derive real term frequencies. Callers that only
/// need membership can collect into a set.
pub fn tokenize(content: &str, path_hint: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let lang = detect_language(content, path_hint);
    let cleaned = strip_literals_and_comments(content);
    let keywords = lang.keywords();

    let mut raw: Vec<String> = Vec::new();

    for found in IDENTIFIER.find_iter(&cleaned) {
        let ident = found.as_str();
        let is_keyword = keywords.is_some_and(|set| set.contains(ident));

        if is_keyword {
            raw.push(ident.to_string());
        } else if !STOP_WORDS.contains(ident.to_lowercase().as_str()) {
            raw.push(ident.to_string());
        }

        // Compound identifiers also contribute their fragments
        split_camel_case(ident, &mut raw);
        split_snake_case(ident, &mut raw);
    }

    for op in OPERATORS {
        if cleaned.contains(op) {
            raw.push((*op).to_string());
        }
    }

    raw.into_iter()
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !is_numeric(t))
        .map(|t| t.to_lowercase())
        .collect()
}

/// Remove string literals first, then comments, replacing each with a space
/// so token boundaries survive.
fn strip_literals_and_comments(content: &str) -> String {
    let without_strings = STRING_LITERALS.replace_all(content, " ");
    COMMENTS.replace_all(&without_strings, " ").into_owned()
}

/// Split on lowercase-to-uppercase boundaries: `getUserById` yields
/// `get`, `User`, `By`, `Id`. Fragments below the minimum length are
/// discarded.
fn split_camel_case(ident: &str, out: &mut Vec<String>) {
    if !has_camel_boundary(ident) {
        return;
    }

    let mut part = String::new();
    let mut prev_lower = false;
    for ch in ident.chars() {
        if ch.is_ascii_uppercase() && prev_lower && !part.is_empty() {
            if part.len() >= MIN_TOKEN_LEN {
                out.push(part.clone());
            }
            part.clear();
        }
        prev_lower = ch.is_ascii_lowercase();
        part.push(ch);
    }
    if part.len() >= MIN_TOKEN_LEN {
        out.push(part);
    }
}

fn has_camel_boundary(ident: &str) -> bool {
    let mut prev_lower = false;
    for ch in ident.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            return true;
        }
        prev_lower = ch.is_ascii_lowercase();
    }
    false
}

fn split_snake_case(ident: &str, out: &mut Vec<String>) {
    if !ident.contains('_') {
        return;
    }
    for part in ident.split('_') {
        if part.len() >= MIN_TOKEN_LEN {
            out.push(part.to_string());
        }
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

/// Trigrams of a token padded with boundary markers, for the fuzzy-matching
/// vocabulary. The double `$` padding means a single edit near either end of
/// the token still changes at least one trigram.
pub fn token_trigrams(token: &str) -> FxHashSet<Trigram> {
    let mut trigrams = FxHashSet::default();
    if token.chars().count() < 3 {
        return trigrams;
    }

    let padded = format!("$${}$$", token.to_lowercase());
    for window in padded.as_bytes().windows(3) {
        trigrams.insert(pack_trigram(window[0], window[1], window[2]));
    }
    trigrams
}
