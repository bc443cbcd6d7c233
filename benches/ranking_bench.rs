// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use farsi_search::build::build_index;
use farsi_search::ranking::{rank_bag_of_words, rank_phrase, RankingConfig};
use farsi_search::types::DocumentRecord;

fn sample_corpus(n: usize) -> BTreeMap<String, DocumentRecord> {
    let mut docs = BTreeMap::new();
    for i in 0..n {
        docs.insert(
            format!("doc{i}"),
            DocumentRecord {
                url: format!("https://example.com/{i}"),
                title: format!("search engine optimization {i}"),
                body: format!(
                    "persian search نمونه متن engine optimization text number {i} filler filler"
                ),
            },
        );
    }
    docs
}

fn bench_ranking(c: &mut Criterion) {
    let docs = sample_corpus(2_000);
    let index = build_index(&docs);
    let config = RankingConfig::default();
    let terms = vec!["search".to_string(), "engine".to_string()];

    c.bench_function("rank_bag_of_words_2k_docs", |b| {
        b.iter(|| rank_bag_of_words(black_box(&index), black_box(&terms), black_box(&config)))
    });

    c.bench_function("rank_phrase_2k_docs", |b| {
        b.iter(|| rank_phrase(black_box(&index), black_box(&terms), black_box(&config)))
    });
}

fn bench_build(c: &mut Criterion) {
    let docs = sample_corpus(500);
    c.bench_function("build_index_500_docs", |b| {
        b.iter(|| build_index(black_box(&docs)))
    });
}

criterion_group!(benches, bench_ranking, bench_build);
criterion_main!(benches);
