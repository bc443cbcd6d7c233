// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index builder: turns a document collection into the positional
//! inverted index, document-lengths table, and IDF table.
//!
//! [`build_index`] is the single-threaded reference path. [`build_index_parallel`]
//! (feature `parallel`) tokenizes documents across a `rayon` pool and merges
//! the partial indexes deterministically - same output, same term-major /
//! doc_id-minor ordering, regardless of worker count.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::error::LoadError;
use crate::normalize::{normalize_index, tokenize};
use crate::types::{
    BuildReport, DocMeta, DocumentLengths, DocumentRecord, FieldLengths, IdfTable, InvertedIndex,
    Metadata, Posting, SearchIndex,
};

fn tokenize_field(text: &str) -> Vec<String> {
    tokenize(&normalize_index(text))
}

#[cfg(feature = "parallel")]
struct TokenizedDocument {
    doc_id: String,
    title_tokens: Vec<String>,
    body_tokens: Vec<String>,
}

fn record_field(
    index: &mut InvertedIndex,
    doc_id: &str,
    tokens: &[String],
    is_title: bool,
) {
    for (position, term) in tokens.iter().enumerate() {
        let postings = index.entry(term.clone()).or_default();
        let posting = postings
            .entry(doc_id.to_string())
            .or_insert_with(Posting::empty);
        if is_title {
            posting.title_tf += 1;
            posting.title_positions.push(position as u32);
        } else {
            posting.body_tf += 1;
            posting.body_positions.push(position as u32);
        }
    }
}

fn finalize_tf_idf(index: &mut InvertedIndex, doc_count: usize) -> IdfTable {
    let mut idf_table = IdfTable::new();
    for (term, postings) in index.iter_mut() {
        let df = postings.len();
        let idf = ((doc_count as f64) / (df as f64 + 1.0)).ln();
        idf_table.insert(term.clone(), idf);
        for posting in postings.values_mut() {
            posting.title_tf_idf = posting.title_tf as f64 * idf;
            posting.body_tf_idf = posting.body_tf as f64 * idf;
        }
    }
    idf_table
}

/// Build the index from a document collection, single-threaded.
///
/// Iteration is over the input map's own (already lexicographic, since it's
/// a `BTreeMap`) key order; a caller supplying a `HashMap` should sort the
/// entries first to get deterministic output.
pub fn build_index(documents: &BTreeMap<String, DocumentRecord>) -> SearchIndex {
    let mut inverted_index = InvertedIndex::new();
    let mut document_lengths = DocumentLengths::new();

    for (doc_id, doc) in documents {
        let title_tokens = tokenize_field(&doc.title);
        let body_tokens = tokenize_field(&doc.body);

        document_lengths.insert(
            doc_id.clone(),
            FieldLengths {
                title_len: title_tokens.len() as u32,
                body_len: body_tokens.len() as u32,
            },
        );

        record_field(&mut inverted_index, doc_id, &title_tokens, true);
        record_field(&mut inverted_index, doc_id, &body_tokens, false);
    }

    let idf_table = finalize_tf_idf(&mut inverted_index, documents.len());

    SearchIndex {
        inverted_index,
        document_lengths,
        idf_table,
    }
}

/// Merge one worker's partial inverted index into the accumulator.
///
/// Each worker's fragment covers a disjoint set of doc_ids, so merging a
/// term's postings list is a plain key-disjoint union; the result is
/// re-sorted into doc_id order by virtue of `BTreeMap::append`/`extend`
/// over `BTreeMap`, which keeps keys ordered regardless of insertion order.
#[cfg(feature = "parallel")]
fn merge_fragment(into: &mut InvertedIndex, fragment: InvertedIndex) {
    for (term, postings) in fragment {
        into.entry(term).or_default().extend(postings);
    }
}

#[cfg(feature = "parallel")]
pub fn build_index_parallel(documents: &BTreeMap<String, DocumentRecord>) -> SearchIndex {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let entries: Vec<(&String, &DocumentRecord)> = documents.iter().collect();
    let progress = ProgressBar::new(entries.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} documents tokenized") {
        progress.set_style(style);
    }

    let tokenized: Vec<TokenizedDocument> = entries
        .par_iter()
        .map(|(doc_id, doc)| {
            let tokenized = TokenizedDocument {
                doc_id: (*doc_id).clone(),
                title_tokens: tokenize_field(&doc.title),
                body_tokens: tokenize_field(&doc.body),
            };
            progress.inc(1);
            tokenized
        })
        .collect();
    progress.finish_and_clear();

    let mut document_lengths = DocumentLengths::new();
    for doc in &tokenized {
        document_lengths.insert(
            doc.doc_id.clone(),
            FieldLengths {
                title_len: doc.title_tokens.len() as u32,
                body_len: doc.body_tokens.len() as u32,
            },
        );
    }

    let fragments: Vec<InvertedIndex> = tokenized
        .par_chunks(std::cmp::max(1, tokenized.len() / rayon::current_num_threads().max(1)))
        .map(|chunk| {
            let mut fragment = InvertedIndex::new();
            for doc in chunk {
                record_field(&mut fragment, &doc.doc_id, &doc.title_tokens, true);
                record_field(&mut fragment, &doc.doc_id, &doc.body_tokens, false);
            }
            fragment
        })
        .collect();

    let mut inverted_index = InvertedIndex::new();
    for fragment in fragments {
        merge_fragment(&mut inverted_index, fragment);
    }

    let idf_table = finalize_tf_idf(&mut inverted_index, documents.len());

    SearchIndex {
        inverted_index,
        document_lengths,
        idf_table,
    }
}

/// Load the crawler's document-input contract: `doc_id -> {url, title, body}`.
///
/// Entries whose `url`/`title`/`body` are not JSON strings are skipped with
/// a warning; the remaining well-formed documents still get indexed.
pub fn load_documents(path: &Path) -> Result<BTreeMap<String, DocumentRecord>, LoadError> {
    let raw = fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;

    let mut documents = BTreeMap::new();
    let Some(object) = parsed.as_object() else {
        return Ok(documents);
    };

    for (doc_id, value) in object {
        let Some(obj) = value.as_object() else {
            eprintln!("warning: skipping document {doc_id:?}: not a JSON object");
            continue;
        };
        let url = obj.get("url").and_then(|v| v.as_str());
        let title = obj.get("title").and_then(|v| v.as_str());
        let body = obj.get("body").and_then(|v| v.as_str());

        match (url, title, body) {
            (Some(url), Some(title), Some(body)) => {
                documents.insert(
                    doc_id.clone(),
                    DocumentRecord {
                        url: url.to_string(),
                        title: title.to_string(),
                        body: body.to_string(),
                    },
                );
            }
            _ => {
                eprintln!(
                    "warning: skipping document {doc_id:?}: missing or non-string url/title/body"
                );
            }
        }
    }

    Ok(documents)
}

fn build_metadata(documents: &BTreeMap<String, DocumentRecord>) -> Metadata {
    documents
        .iter()
        .map(|(doc_id, doc)| {
            (
                doc_id.clone(),
                DocMeta {
                    url: doc.url.clone(),
                    title: doc.title.clone(),
                },
            )
        })
        .collect()
}

/// Orchestrates a full build: load documents, build the index, write the
/// index artifact, metadata side-file, and build report into `output_dir`.
pub fn run_build(
    input_path: &Path,
    output_dir: &Path,
    parallel: bool,
) -> Result<BuildReport, crate::error::CliError> {
    let started = Instant::now();

    println!("loading documents from {}", input_path.display());
    let documents = load_documents(input_path)?;
    if documents.is_empty() {
        println!("⚠️  no documents loaded, writing an empty index");
    }

    #[cfg(feature = "parallel")]
    let index = if parallel {
        build_index_parallel(&documents)
    } else {
        build_index(&documents)
    };
    #[cfg(not(feature = "parallel"))]
    let index = {
        let _ = parallel;
        build_index(&documents)
    };

    fs::create_dir_all(output_dir).map_err(crate::error::StoreError::from)?;

    let index_path = output_dir.join("index.bin");
    let bytes = crate::store::encode_index(&index);
    fs::write(&index_path, &bytes).map_err(crate::error::StoreError::from)?;

    let metadata = build_metadata(&documents);
    let metadata_path = output_dir.join("metadata.json");
    let metadata_json = serde_json::to_string_pretty(&metadata)
        .map_err(|e| crate::error::CliError::Message(format!("failed to serialize metadata: {e}")))?;
    fs::write(&metadata_path, metadata_json).map_err(crate::error::StoreError::from)?;

    let report = BuildReport {
        total_documents: documents.len(),
        unique_terms: index.term_count(),
        total_time_seconds: started.elapsed().as_secs_f64(),
    };
    let report_path = output_dir.join("report.json");
    let report_json = serde_json::to_string_pretty(&report)
        .map_err(|e| crate::error::CliError::Message(format!("failed to serialize report: {e}")))?;
    fs::write(&report_path, report_json).map_err(crate::error::StoreError::from)?;

    println!(
        "✅ build complete: {} documents, {} terms, {:.3}s",
        report.total_documents, report.unique_terms, report.total_time_seconds
    );

    Ok(report)
}
