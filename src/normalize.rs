// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization and tokenization.
//!
//! Two normalizers, not one. The indexer and the query parser must agree on
//! everything except what happens to a forbidden character: the indexer
//! drops it (merging the tokens on either side), the query parser replaces
//! it with a space (keeping them apart). This asymmetry is carried over
//! verbatim from the system this crate replaces - see the doc comment on
//! [`normalize_query`].

const YEH_ARABIC: char = '\u{064A}';
const YEH_FARSI: char = '\u{06CC}';
const KAF_ARABIC: char = '\u{0643}';
const KAF_FARSI: char = '\u{06A9}';

fn fold_letters(c: char) -> char {
    match c {
        YEH_ARABIC => YEH_FARSI,
        KAF_ARABIC => KAF_FARSI,
        other => other,
    }
}

fn in_arabic_block(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || in_arabic_block(c)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize text for the **indexer** path: forbidden characters are removed
/// entirely, so `"a!b"` normalizes to `"ab"`.
pub fn normalize_index(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(fold_letters)
        .map(|c| c.to_ascii_lowercase())
        .filter(|&c| is_allowed(c))
        .collect();
    collapse_whitespace(&folded)
}

/// Normalize text for the **query** path: forbidden characters are replaced
/// with a space, so `"a!b"` normalizes to `"a b"`.
///
/// This is a deliberate asymmetry with [`normalize_index`], not an oversight:
/// the system this crate is modeled on does exactly this, and unifying the
/// two would silently change which documents a query matches.
pub fn normalize_query(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(fold_letters)
        .map(|c| c.to_ascii_lowercase())
        .map(|c| if is_allowed(c) { c } else { ' ' })
        .collect();
    collapse_whitespace(&folded)
}

/// Split already-normalized text into tokens: maximal runs of word
/// characters or characters in the Arabic/Farsi block.
pub fn tokenize(normalized: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in normalized.chars() {
        if c.is_alphanumeric() || c == '_' || in_arabic_block(c) {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_yeh_and_kaf() {
        assert_eq!(normalize_index("\u{064A}"), "\u{06CC}");
        assert_eq!(normalize_index("\u{0643}"), "\u{06A9}");
    }

    #[test]
    fn lowercases_ascii_only() {
        assert_eq!(normalize_index("HELLO"), "hello");
    }

    #[test]
    fn index_path_drops_forbidden_chars() {
        assert_eq!(normalize_index("a!b"), "ab");
    }

    #[test]
    fn query_path_replaces_forbidden_chars_with_space() {
        assert_eq!(normalize_query("a!b"), "a b");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize_index("  a   b  "), "a b");
    }

    #[test]
    fn preserves_arabic_range_characters() {
        let text = "\u{0633}\u{0644}\u{0627}\u{0645}"; // سلام
        assert_eq!(normalize_index(text), text);
    }

    #[test]
    fn normalizer_is_idempotent() {
        let samples = ["Salām! سَلام", "  HELLO  world  ", "\u{064A}\u{0643}"];
        for s in samples {
            let once = normalize_index(s);
            let twice = normalize_index(&once);
            assert_eq!(once, twice);
            let once_q = normalize_query(s);
            let twice_q = normalize_query(&once_q);
            assert_eq!(once_q, twice_q);
        }
    }

    #[test]
    fn tokenize_basic() {
        assert_eq!(tokenize("hello world"), vec!["hello", "world"]);
    }

    #[test]
    fn tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn tokenizer_round_trips_through_single_space_join() {
        let text = "search engine optimization";
        let tokens = tokenize(text);
        let rejoined = tokens.join(" ");
        assert_eq!(tokenize(&rejoined), tokens);
    }

    #[test]
    fn scenario_salam_normalizer() {
        let text = "Salām! سَلام";
        let normalized = normalize_index(text);
        let tokens = tokenize(&normalized);
        assert_eq!(tokens.len(), 2);
    }
}
