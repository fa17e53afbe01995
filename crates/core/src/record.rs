// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persisted scan record shape
//!
//! One record is appended to the session log per accepted code. Records
//! are immutable once written; the log is the sole authority for session
//! state and every in-memory view must be derivable by replaying it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single accepted scan: which box it went into, the code, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Destination box, starting at 1
    pub box_number: u32,
    /// The validated (trimmed) code
    pub code: String,
    /// Wall-clock acceptance time, serialized as ISO-8601
    pub timestamp: DateTime<Utc>,
}

impl ScanRecord {
    pub fn new(box_number: u32, code: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            box_number,
            code: code.into(),
            timestamp,
        }
    }
}
