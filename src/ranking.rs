// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ranking engine: TF-IDF combine with length normalization, a
//! minimum-span proximity bonus, and exact-phrase matching.
//!
//! Two independent ranking functions, one per query mode. Both take a
//! [`RankingConfig`] so weights are never hard-coded at the call site.

use std::collections::BTreeSet;

use crate::minspan::min_span;
use crate::types::{Posting, SearchIndex, SearchResult};

/// Tunable ranking weights. Defaults match the reference behavior this
/// crate reproduces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingConfig {
    pub title_weight: f64,
    pub body_weight: f64,
    pub span_boost_factor: f64,
    pub proximity_power: f64,
    pub max_span_dist: u32,
}

const TITLE_EXACT_BONUS: f64 = 50.0;
const PHRASE_SCORE_MULTIPLIER: f64 = 100.0;

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            title_weight: 0.7,
            body_weight: 0.3,
            span_boost_factor: 2.0,
            proximity_power: 3.0,
            max_span_dist: 20,
        }
    }
}

fn candidate_union(index: &SearchIndex, terms: &[String]) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();
    for term in terms {
        if let Some(postings) = index.postings_for(term) {
            candidates.extend(postings.keys().cloned());
        }
    }
    candidates
}

fn candidate_intersection(index: &SearchIndex, terms: &[String]) -> BTreeSet<String> {
    let mut iter = terms.iter();
    let first = match iter.next() {
        Some(t) => t,
        None => return BTreeSet::new(),
    };
    let mut candidates: BTreeSet<String> = match index.postings_for(first) {
        Some(postings) => postings.keys().cloned().collect(),
        None => return BTreeSet::new(),
    };
    for term in iter {
        let Some(postings) = index.postings_for(term) else {
            return BTreeSet::new();
        };
        candidates.retain(|doc_id| postings.contains_key(doc_id));
        if candidates.is_empty() {
            break;
        }
    }
    candidates
}

fn posting_for<'a>(index: &'a SearchIndex, term: &str, doc_id: &str) -> Option<&'a Posting> {
    index.postings_for(term).and_then(|p| p.get(doc_id))
}

fn sort_results(results: &mut Vec<SearchResult>) {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
}

/// Score every candidate document against an unordered bag of query terms.
pub fn rank_bag_of_words(
    index: &SearchIndex,
    terms: &[String],
    config: &RankingConfig,
) -> Vec<SearchResult> {
    if terms.is_empty() {
        return Vec::new();
    }

    let candidates = candidate_union(index, terms);
    let mut results = Vec::new();

    for doc_id in candidates {
        let lengths = index.lengths_for(&doc_id).unwrap_or(crate::types::FieldLengths {
            title_len: 0,
            body_len: 0,
        });
        let title_len = lengths.title_len.max(1) as f64;
        let body_len = lengths.body_len.max(1) as f64;

        let mut title_score = 0.0;
        let mut body_score = 0.0;
        let mut title_position_lists: Vec<Vec<u32>> = Vec::with_capacity(terms.len());
        let mut body_position_lists: Vec<Vec<u32>> = Vec::with_capacity(terms.len());

        for term in terms {
            if let Some(posting) = posting_for(index, term, &doc_id) {
                title_score += posting.title_tf_idf;
                body_score += posting.body_tf_idf;
                title_position_lists.push(posting.title_positions.clone());
                body_position_lists.push(posting.body_positions.clone());
            } else {
                title_position_lists.push(Vec::new());
                body_position_lists.push(Vec::new());
            }
        }

        let norm_title = title_score / title_len.sqrt();
        let norm_body = body_score / body_len.sqrt();
        let combined = config.title_weight * norm_title + config.body_weight * norm_body;

        let mut prox_bonus = 0.0;
        let mut title_exact_bonus = 0.0;

        let title_refs: Vec<&[u32]> = title_position_lists.iter().map(|v| v.as_slice()).collect();
        if let Some(span) = min_span(&title_refs) {
            if span < config.max_span_dist {
                prox_bonus += config.title_weight
                    * (1.0 / (1.0 + span as f64)).powf(config.proximity_power);
            }
            if span as usize == terms.len() - 1 {
                title_exact_bonus = TITLE_EXACT_BONUS;
            }
        }

        let body_refs: Vec<&[u32]> = body_position_lists.iter().map(|v| v.as_slice()).collect();
        if let Some(span) = min_span(&body_refs) {
            if span < config.max_span_dist {
                prox_bonus +=
                    config.body_weight * (1.0 / (1.0 + span as f64)).powf(config.proximity_power);
            }
        }

        let final_score = combined * (1.0 + config.span_boost_factor * prox_bonus) + title_exact_bonus;

        if final_score > 0.0 {
            results.push(SearchResult {
                doc_id,
                score: final_score,
            });
        }
    }

    sort_results(&mut results);
    results
}

/// True if, for some starting position `p` of `terms[0]` in `field_positions_of(terms[0])`,
/// the positions `p+1, ..., p+k-1` are present in the corresponding field's
/// position list for each subsequent term.
fn field_phrase_match(index: &SearchIndex, terms: &[String], doc_id: &str, title: bool) -> bool {
    let first_positions = match posting_for(index, &terms[0], doc_id) {
        Some(p) => {
            if title {
                &p.title_positions
            } else {
                &p.body_positions
            }
        }
        None => return false,
    };

    'candidate: for &p in first_positions {
        for (offset, term) in terms.iter().enumerate().skip(1) {
            let want = p + offset as u32;
            let has = match posting_for(index, term, doc_id) {
                Some(posting) => {
                    let positions = if title {
                        &posting.title_positions
                    } else {
                        &posting.body_positions
                    };
                    positions.binary_search(&want).is_ok()
                }
                None => false,
            };
            if !has {
                continue 'candidate;
            }
        }
        return true;
    }
    false
}

/// Score candidate documents for an exact-phrase query. Falls back to
/// bag-of-words for a single-term query.
pub fn rank_phrase(
    index: &SearchIndex,
    terms: &[String],
    config: &RankingConfig,
) -> Vec<SearchResult> {
    if terms.is_empty() {
        return Vec::new();
    }
    if terms.len() == 1 {
        return rank_bag_of_words(index, terms, config);
    }

    let candidates = candidate_intersection(index, terms);
    let mut results = Vec::new();

    for doc_id in candidates {
        let title_match = field_phrase_match(index, terms, &doc_id, true);
        let body_match = field_phrase_match(index, terms, &doc_id, false);
        if !title_match && !body_match {
            continue;
        }

        let mut base_score = 0.0;
        for term in terms {
            if let Some(posting) = posting_for(index, term, &doc_id) {
                base_score +=
                    config.title_weight * posting.title_tf_idf + config.body_weight * posting.body_tf_idf;
            }
        }
        let final_score = base_score * PHRASE_SCORE_MULTIPLIER;

        // Unlike bag-of-words ranking, phrase ranking has no positive-score
        // filter: a phrase match is a phrase match regardless of sign.
        results.push(SearchResult {
            doc_id,
            score: final_score,
        });
    }

    sort_results(&mut results);
    results
}

/// Cut a ranked result list down to the top `k`. Results are already sorted
/// by [`sort_results`]'s ordering (score desc, doc_id asc tiebreak); this is
/// just the presentation-layer cutoff, kept here so the default (20) lives
/// next to the ranking weights it pairs with.
pub const DEFAULT_TOP_K: usize = 20;

pub fn top_k(mut results: Vec<SearchResult>, k: usize) -> Vec<SearchResult> {
    results.truncate(k);
    results
}
