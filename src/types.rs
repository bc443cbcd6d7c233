// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data model: documents, postings, the inverted index, and the
//! tables that sit alongside it.
//!
//! Everything here is a plain value type. The index itself is immutable
//! once built - there is no method on `SearchIndex` that mutates it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A document as it arrives from the crawler's output: `doc_id -> {url, title, body}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// The record for one `(term, doc_id)` pair.
///
/// `title_positions` and `body_positions` are strictly increasing and their
/// lengths equal `title_tf`/`body_tf` respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub title_tf: u32,
    pub body_tf: u32,
    pub title_positions: Vec<u32>,
    pub body_positions: Vec<u32>,
    pub title_tf_idf: f64,
    pub body_tf_idf: f64,
}

impl Posting {
    pub(crate) fn empty() -> Self {
        Posting {
            title_tf: 0,
            body_tf: 0,
            title_positions: Vec::new(),
            body_positions: Vec::new(),
            title_tf_idf: 0.0,
            body_tf_idf: 0.0,
        }
    }
}

/// `doc_id -> Posting`, ordered by `doc_id` for determinism.
pub type PostingsList = BTreeMap<String, Posting>;

/// `term -> PostingsList`, ordered by `term` for determinism.
pub type InvertedIndex = BTreeMap<String, PostingsList>;

/// Per-document field lengths, in tokens (not characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLengths {
    pub title_len: u32,
    pub body_len: u32,
}

/// `doc_id -> FieldLengths`.
pub type DocumentLengths = BTreeMap<String, FieldLengths>;

/// `term -> idf`.
pub type IdfTable = BTreeMap<String, f64>;

/// `doc_id -> {url, title}`, the side-output consumed by the presentation layer.
pub type Metadata = BTreeMap<String, DocMeta>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMeta {
    pub url: String,
    pub title: String,
}

/// Build-time statistics, written alongside the index artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub total_documents: usize,
    pub unique_terms: usize,
    pub total_time_seconds: f64,
}

/// The fully built, immutable index: the triple persisted by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndex {
    pub inverted_index: InvertedIndex,
    pub document_lengths: DocumentLengths,
    pub idf_table: IdfTable,
}

impl SearchIndex {
    pub fn document_count(&self) -> usize {
        self.document_lengths.len()
    }

    pub fn term_count(&self) -> usize {
        self.inverted_index.len()
    }

    pub fn postings_for(&self, term: &str) -> Option<&PostingsList> {
        self.inverted_index.get(term)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf_table.get(term).copied()
    }

    pub fn lengths_for(&self, doc_id: &str) -> Option<FieldLengths> {
        self.document_lengths.get(doc_id).copied()
    }
}

/// One scored hit, as returned by the ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub doc_id: String,
    pub score: f64,
}
