// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Atomic snapshot reload (feature `reload`).
//!
//! Query serving reads an immutable snapshot of the index; a reload swaps
//! in a new one without ever exposing readers to a half-updated index.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::SearchIndex;

/// Holds the currently-live index snapshot behind a `RwLock<Arc<_>>`.
///
/// Readers call [`IndexHandle::snapshot`] to get an `Arc` clone - a brief
/// read-lock acquisition, then lock-free querying of the returned `Arc`.
/// A writer calls [`IndexHandle::swap`] to publish a new snapshot; readers
/// that already hold an `Arc` keep querying the old one until they ask
/// again, and no reader ever sees a mix of old and new data.
pub struct IndexHandle {
    current: RwLock<Arc<SearchIndex>>,
}

impl IndexHandle {
    pub fn new(index: SearchIndex) -> Self {
        IndexHandle {
            current: RwLock::new(Arc::new(index)),
        }
    }

    pub fn snapshot(&self) -> Arc<SearchIndex> {
        self.current.read().clone()
    }

    pub fn swap(&self, index: SearchIndex) {
        *self.current.write() = Arc::new(index);
    }
}
