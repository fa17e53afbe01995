// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log writer for durable append operations
//!
//! Appends are fsync'd before returning: a record the writer has
//! acknowledged is a record a replay will see. Readers never observe
//! an entry the log considers unwritten.

use crate::entry::LogEntry;
use crate::LogError;
use packbox_core::ScanRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only writer for one session log artifact
pub struct LogWriter {
    path: PathBuf,
    file: File,
    next_sequence: u64,
}

impl LogWriter {
    /// Open or create a session log file
    ///
    /// If the file exists, scans to find the next sequence number.
    pub fn open(path: &Path) -> Result<Self, LogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let next_sequence = if path.exists() {
            Self::scan_last_sequence(path)?.map(|s| s + 1).unwrap_or(0)
        } else {
            0
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            next_sequence,
        })
    }

    /// Scan a log file to find the last valid sequence number
    fn scan_last_sequence(path: &Path) -> Result<Option<u64>, LogError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut last_sequence = None;

        for line_result in reader.lines() {
            let line = match line_result {
                Ok(l) => l,
                Err(_) => break, // Stop at read error
            };

            if line.is_empty() {
                continue;
            }

            match LogEntry::from_line(&line) {
                Ok(entry) => {
                    if entry.verify() {
                        last_sequence = Some(entry.sequence);
                    } else {
                        break; // Stop at checksum mismatch
                    }
                }
                Err(_) => break, // Stop at parse error (truncated write)
            }
        }

        Ok(last_sequence)
    }

    /// Append a scan record to the log
    ///
    /// Returns the assigned sequence number. The record is durably
    /// persisted (fsync'd) before this method returns.
    pub fn append(&mut self, record: ScanRecord) -> Result<u64, LogError> {
        let sequence = self.next_sequence;

        let entry = LogEntry::new(sequence, record);
        let line = entry.to_line()?;

        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;

        // Critical: sync to ensure durability before returning
        self.file.sync_all()?;

        self.next_sequence += 1;
        Ok(sequence)
    }

    /// Get current sequence number (next to be assigned)
    pub fn sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Get the path to the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
