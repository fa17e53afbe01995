// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full-history duplicate tracking
//!
//! Uniqueness is global to the session, not per box: a code accepted into
//! box 1 is still a duplicate when box 7 is filling. The set grows with
//! session length, which is fine for manual scanning (thousands of codes).

use std::collections::HashSet;

/// Every code ever accepted in the session's lifetime
#[derive(Debug, Default, Clone)]
pub struct DedupSet {
    codes: HashSet<String>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_duplicate(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Record a code after acceptance
    pub fn record(&mut self, code: impl Into<String>) {
        self.codes.insert(code.into());
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for DedupSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.codes.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
