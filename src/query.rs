// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing: phrase-vs-bag-of-words dispatch, then the same
//! normalize+tokenize pipeline the indexer uses (query path).

use crate::normalize::{normalize_query, tokenize};

/// Whether a parsed query should be scored as an exact phrase or as an
/// unordered bag of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Phrase,
    BagOfWords,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub mode: QueryMode,
    pub terms: Vec<String>,
}

/// Parse a raw user query string.
///
/// A string both starting and ending with `"` (and at least 2 characters
/// long) is treated as a phrase query with the quotes stripped; everything
/// else is bag-of-words. Both paths then normalize and tokenize identically.
pub fn parse_query(raw: &str) -> ParsedQuery {
    let trimmed = raw.trim();
    let (mode, body) = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"')
    {
        (QueryMode::Phrase, &trimmed[1..trimmed.len() - 1])
    } else {
        (QueryMode::BagOfWords, trimmed)
    };

    let terms = tokenize(&normalize_query(body));
    ParsedQuery { mode, terms }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_of_words_basic() {
        let q = parse_query("search engine");
        assert_eq!(q.mode, QueryMode::BagOfWords);
        assert_eq!(q.terms, vec!["search", "engine"]);
    }

    #[test]
    fn phrase_strips_quotes() {
        let q = parse_query("\"search engine\"");
        assert_eq!(q.mode, QueryMode::Phrase);
        assert_eq!(q.terms, vec!["search", "engine"]);
    }

    #[test]
    fn empty_phrase_after_quote_strip_is_empty() {
        let q = parse_query("\"\"");
        assert_eq!(q.mode, QueryMode::Phrase);
        assert!(q.terms.is_empty());
    }

    #[test]
    fn empty_query_is_empty() {
        let q = parse_query("");
        assert!(q.terms.is_empty());
    }

    #[test]
    fn single_quote_char_is_not_a_phrase() {
        let q = parse_query("\"");
        assert_eq!(q.mode, QueryMode::BagOfWords);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_quote_detection() {
        let q = parse_query("  \"search engine\"  ");
        assert_eq!(q.mode, QueryMode::Phrase);
        assert_eq!(q.terms, vec!["search", "engine"]);
    }
}
