// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A positional inverted index and TF-IDF ranking engine for a Persian
//! (Farsi) web search pipeline.
//!
//! The crate is the trio the original system actually needs correctness
//! guarantees on: a normalize+tokenize contract shared by the indexer and
//! the query parser, a positional inverted index with per-field TF-IDF, and
//! a ranking engine with exact-phrase matching and a minimum-span proximity
//! bonus. Crawling, HTML stripping, and result presentation are external
//! collaborators with fixed interfaces - see [`types::DocumentRecord`] for
//! the document contract this crate consumes.
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use farsi_search::build::build_index;
//! use farsi_search::query::parse_query;
//! use farsi_search::ranking::{rank_bag_of_words, rank_phrase, RankingConfig};
//! use farsi_search::query::QueryMode;
//! use farsi_search::types::DocumentRecord;
//!
//! let mut docs = BTreeMap::new();
//! docs.insert(
//!     "abc123".to_string(),
//!     DocumentRecord { url: "https://example.com".into(), title: "search engine".into(), body: String::new() },
//! );
//! let index = build_index(&docs);
//! let parsed = parse_query("search engine");
//! let config = RankingConfig::default();
//! let results = match parsed.mode {
//!     QueryMode::Phrase => rank_phrase(&index, &parsed.terms, &config),
//!     QueryMode::BagOfWords => rank_bag_of_words(&index, &parsed.terms, &config),
//! };
//! assert!(!results.is_empty());
//! ```

pub mod build;
pub mod cli;
pub mod error;
pub mod minspan;
pub mod normalize;
pub mod query;
pub mod ranking;
#[cfg(feature = "reload")]
pub mod reload;
pub mod store;
pub mod types;

pub use error::{CliError, LoadError, StoreError};
pub use query::{parse_query, ParsedQuery, QueryMode};
pub use ranking::{rank_bag_of_words, rank_phrase, top_k, RankingConfig};
pub use types::{SearchIndex, SearchResult};
