// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use farsi_search::cli::{Cli, Command};
use farsi_search::error::CliError;
use farsi_search::query::{parse_query, QueryMode};
use farsi_search::ranking::{rank_bag_of_words, rank_phrase, top_k, RankingConfig};
use farsi_search::store::{decode_index, read_format_version};
use farsi_search::types::Metadata;

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            input,
            output,
            no_parallel,
        } => {
            farsi_search::build::run_build(&input, &output, !no_parallel)?;
            Ok(())
        }
        Command::Search {
            index,
            query,
            top_k: top_k_count,
            phrase,
        } => {
            let index_path = index.join("index.bin");
            let bytes = fs::read(&index_path).map_err(farsi_search::error::StoreError::from)?;
            let search_index = decode_index(&bytes)?;

            let metadata_path = index.join("metadata.json");
            let metadata: Metadata = fs::read_to_string(&metadata_path)
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default();

            let mut parsed = parse_query(&query);
            if phrase {
                parsed.mode = QueryMode::Phrase;
            }

            let config = RankingConfig::default();
            let results = match parsed.mode {
                QueryMode::Phrase => rank_phrase(&search_index, &parsed.terms, &config),
                QueryMode::BagOfWords => rank_bag_of_words(&search_index, &parsed.terms, &config),
            };
            let results = top_k(results, top_k_count);

            if results.is_empty() {
                println!("no results");
            }
            for result in &results {
                let title = metadata
                    .get(&result.doc_id)
                    .map(|m| m.title.as_str())
                    .unwrap_or("(unknown title)");
                println!("{:>10.4}  {}  {}", result.score, result.doc_id, title);
            }
            Ok(())
        }
        Command::Inspect { index } => {
            let bytes = fs::read(&index).map_err(farsi_search::error::StoreError::from)?;
            let file_size = bytes.len();
            let format_version = read_format_version(&bytes)?;
            let search_index = decode_index(&bytes)?;
            println!("documents:      {}", search_index.document_count());
            println!("terms:          {}", search_index.term_count());
            println!("file size:      {file_size} bytes");
            println!("format version: {format_version}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
