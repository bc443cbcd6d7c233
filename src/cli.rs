// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command-line surface: `build`, `search`, `inspect`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "farsi-search", version, about = "Persian-language search index builder and query engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an index artifact from a crawler's document-input JSON file.
    Build {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Disable the parallel tokenization/merge path even if compiled in.
        #[arg(long)]
        no_parallel: bool,
    },
    /// Load an index artifact and run one query against it.
    Search {
        /// Directory produced by `build` (containing `index.bin` and `metadata.json`).
        #[arg(long)]
        index: PathBuf,
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 20)]
        top_k: usize,
        /// Force phrase mode even if the query isn't quoted.
        #[arg(long)]
        phrase: bool,
    },
    /// Print summary statistics for an index artifact.
    Inspect {
        /// Path to the `index.bin` file itself.
        index: PathBuf,
    },
}
