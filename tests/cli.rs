// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Drives the compiled `farsi-search` binary end-to-end through `build`,
//! `inspect`, and `search`, instead of calling the library functions those
//! subcommands wrap. This is what actually exercises the CLI argument
//! contract (`search --index <dir>` vs. `inspect <index.bin>`) rather than
//! just the functions behind it.

use std::fs;
use std::process::Command;

fn bin_path() -> &'static str {
    // Cargo sets one of these per binary target; hyphens in the target name
    // become underscores because environment variable names can't contain `-`.
    env!("CARGO_BIN_EXE_farsi_search")
}

fn write_fixture(path: &std::path::Path) {
    let mut docs = serde_json::Map::new();
    docs.insert(
        "d1".into(),
        serde_json::json!({"url": "https://example.com/d1", "title": "search engine", "body": ""}),
    );
    docs.insert(
        "d2".into(),
        serde_json::json!({"url": "https://example.com/d2", "title": "engine", "body": "search"}),
    );
    docs.insert(
        "d3".into(),
        serde_json::json!({"url": "https://example.com/d3", "title": "", "body": "search engine optimization"}),
    );
    docs.insert(
        "d4".into(),
        serde_json::json!({"url": "https://example.com/d4", "title": "weather forecast", "body": "rain expected tomorrow"}),
    );
    // Missing `body` entirely - exercises the skip-and-warn malformed-document path.
    docs.insert(
        "bad".into(),
        serde_json::json!({"url": "https://example.com/bad", "title": "incomplete"}),
    );
    let contents = serde_json::Value::Object(docs);
    fs::write(path, serde_json::to_string_pretty(&contents).unwrap()).unwrap();
}

#[test]
fn build_inspect_and_search_round_trip_through_the_binary() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("crawled_pages.json");
    write_fixture(&input_path);
    let output_dir = dir.path().join("out");

    let build_status = Command::new(bin_path())
        .args(["build", "--input"])
        .arg(&input_path)
        .arg("--output")
        .arg(&output_dir)
        .status()
        .expect("failed to run farsi-search build");
    assert!(build_status.success());
    assert!(output_dir.join("index.bin").exists());
    assert!(output_dir.join("metadata.json").exists());
    assert!(output_dir.join("report.json").exists());

    let inspect_output = Command::new(bin_path())
        .arg("inspect")
        .arg(output_dir.join("index.bin"))
        .output()
        .expect("failed to run farsi-search inspect");
    assert!(inspect_output.status.success());
    let inspect_stdout = String::from_utf8(inspect_output.stdout).unwrap();
    assert!(inspect_stdout.contains("documents:      4"));
    assert!(inspect_stdout.contains("terms:"));
    assert!(inspect_stdout.contains("file size:"));
    assert!(inspect_stdout.contains("format version:"));

    let phrase_output = Command::new(bin_path())
        .arg("search")
        .arg("--index")
        .arg(&output_dir)
        .arg("--query")
        .arg("\"search engine\"")
        .output()
        .expect("failed to run farsi-search search (phrase)");
    assert!(phrase_output.status.success());
    let phrase_stdout = String::from_utf8(phrase_output.stdout).unwrap();
    assert!(phrase_stdout.contains("d1"));
    assert!(!phrase_stdout.contains("d4"));

    let bag_output = Command::new(bin_path())
        .arg("search")
        .arg("--index")
        .arg(&output_dir)
        .arg("--query")
        .arg("search engine")
        .output()
        .expect("failed to run farsi-search search (bag of words)");
    assert!(bag_output.status.success());
    let bag_stdout = String::from_utf8(bag_output.stdout).unwrap();
    assert!(bag_stdout.contains("d1"));
    assert!(!bag_stdout.contains("d4"));
}

#[test]
fn search_rejects_a_bare_index_bin_path_as_the_directory_argument() {
    // `--index` is documented as the build output directory, not index.bin
    // itself; pointing it straight at the file should fail to find
    // `<path>/index.bin` underneath it rather than silently reading garbage.
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("crawled_pages.json");
    write_fixture(&input_path);
    let output_dir = dir.path().join("out");

    let build_status = Command::new(bin_path())
        .arg("build")
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_dir)
        .status()
        .expect("failed to run farsi-search build");
    assert!(build_status.success());

    let search_status = Command::new(bin_path())
        .arg("search")
        .arg("--index")
        .arg(output_dir.join("index.bin"))
        .arg("--query")
        .arg("search")
        .status()
        .expect("failed to run farsi-search search");
    assert!(!search_status.success());
}
