// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for document loading, index persistence, and the CLI.
//!
//! Plain enums, hand-written `Display` and `Error` impls. No `anyhow`, no
//! `thiserror` - just the boundaries that can actually fail.

use std::fmt;
use std::io;

/// Failures while reading the crawler's document-input contract.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read document input: {e}"),
            LoadError::Json(e) => write!(f, "failed to parse document input as JSON: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

/// Failures while encoding or decoding an index artifact.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    BadMagic,
    UnsupportedVersion(u32),
    Truncated { expected: usize, got: usize },
    ChecksumMismatch { expected: u32, got: u32 },
    InvalidUtf8,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "index store I/O error: {e}"),
            StoreError::BadMagic => write!(f, "index store header has an invalid magic number"),
            StoreError::UnsupportedVersion(v) => {
                write!(f, "index store format version {v} is not supported")
            }
            StoreError::Truncated { expected, got } => write!(
                f,
                "index store is truncated: expected at least {expected} bytes, found {got}"
            ),
            StoreError::ChecksumMismatch { expected, got } => write!(
                f,
                "index store checksum mismatch: expected {expected:#010x}, computed {got:#010x}"
            ),
            StoreError::InvalidUtf8 => write!(f, "index store contains invalid UTF-8 data"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Top-level error surfaced by the CLI's `main`, wrapping the boundary errors.
#[derive(Debug)]
pub enum CliError {
    Load(LoadError),
    Store(StoreError),
    Message(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Load(e) => write!(f, "{e}"),
            CliError::Store(e) => write!(f, "{e}"),
            CliError::Message(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Load(e) => Some(e),
            CliError::Store(e) => Some(e),
            CliError::Message(_) => None,
        }
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        CliError::Load(e)
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}
