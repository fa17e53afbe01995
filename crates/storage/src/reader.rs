// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log reader for iterating and replaying entries
//!
//! Iteration yields entries in append order and surfaces the first
//! corrupted entry (parse failure or checksum mismatch) as an error.
//! The resolver treats any corruption as grounds to abandon the
//! artifact and start a fresh session.

use crate::entry::LogEntry;
use packbox_core::ScanRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading log entries
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("corrupted entry at line {line}: {reason}")]
    Corrupted { line: u64, reason: String },
    #[error("checksum mismatch at line {line}")]
    ChecksumMismatch { line: u64 },
    #[error("sequence gap at line {line}: expected {expected}, found {found}")]
    SequenceGap { line: u64, expected: u64, found: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reader over one session log artifact
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    /// Create a reader; a missing file reads as an empty log
    pub fn open_or_empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Iterate over entries in append order
    pub fn entries(&self) -> Result<LogEntryIter, ReadError> {
        LogEntryIter::new(&self.path)
    }

    /// Replay the full log into the ordered record list
    ///
    /// Errors on the first invalid entry; a valid prefix is not enough,
    /// the whole artifact is either trusted or abandoned.
    pub fn replay(&self) -> Result<Vec<ScanRecord>, ReadError> {
        let mut records = Vec::new();
        let mut expected_sequence = 0u64;
        let mut entries = self.entries()?;

        while let Some(entry_result) = entries.next() {
            let entry = entry_result?;
            if entry.sequence != expected_sequence {
                return Err(ReadError::SequenceGap {
                    line: entries.line_number(),
                    expected: expected_sequence,
                    found: entry.sequence,
                });
            }
            expected_sequence += 1;
            records.push(entry.record);
        }

        Ok(records)
    }

    /// Get the path to the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Iterator over log entries with line tracking
pub struct LogEntryIter {
    reader: Option<BufReader<File>>,
    line_number: u64,
}

impl LogEntryIter {
    fn new(path: &Path) -> Result<Self, ReadError> {
        let reader = match File::open(path) {
            Ok(f) => Some(BufReader::new(f)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            reader,
            line_number: 0,
        })
    }

    /// Physical line number of the most recently read line
    ///
    /// Counts every line including blank ones the iterator skips, so
    /// errors point at the actual position in the file.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl Iterator for LogEntryIter {
    type Item = Result<LogEntry, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;

        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    self.line_number += 1;

                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let entry = match LogEntry::from_line(trimmed) {
                        Ok(e) => e,
                        Err(e) => {
                            return Some(Err(ReadError::Corrupted {
                                line: self.line_number,
                                reason: e.to_string(),
                            }));
                        }
                    };

                    if !entry.verify() {
                        return Some(Err(ReadError::ChecksumMismatch {
                            line: self.line_number,
                        }));
                    }

                    return Some(Ok(entry));
                }
                Err(e) => return Some(Err(ReadError::Io(e))),
            }
        }
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
