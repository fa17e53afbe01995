// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log entry structure with checksum verification
//!
//! Each entry wraps one scan record with a per-session sequence number
//! and a CRC32 checksum so truncated writes and bit flips are detected
//! during replay.

use crate::LogError;
use packbox_core::ScanRecord;
use serde::{Deserialize, Serialize};

/// A single entry in the session log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Monotonically increasing sequence number within the session
    pub sequence: u64,
    /// The accepted scan being recorded
    pub record: ScanRecord,
    /// CRC32 checksum of the serialized record
    pub checksum: u32,
}

impl LogEntry {
    /// Create a new entry with computed checksum
    pub fn new(sequence: u64, record: ScanRecord) -> Self {
        let checksum = Self::calculate_checksum(&record);
        Self {
            sequence,
            record,
            checksum,
        }
    }

    /// Calculate CRC32 checksum of the record
    fn calculate_checksum(record: &ScanRecord) -> u32 {
        // Unwrap safety: ScanRecord always serializes successfully since
        // it only contains u32, String, and DateTime<Utc>
        let json = serde_json::to_string(record).unwrap_or_else(|_| String::new());
        crc32fast::hash(json.as_bytes())
    }

    /// Verify the checksum matches the record
    pub fn verify(&self) -> bool {
        self.checksum == Self::calculate_checksum(&self.record)
    }

    /// Serialize to newline-delimited JSON (one line)
    pub fn to_line(&self) -> Result<String, LogError> {
        serde_json::to_string(self).map_err(LogError::from)
    }

    /// Parse from a single line of JSON
    pub fn from_line(line: &str) -> Result<Self, LogError> {
        serde_json::from_str(line).map_err(LogError::from)
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
