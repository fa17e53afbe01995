// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Export projector: derived per-box table
//!
//! A read-only projection of the session log, keyed by box number with
//! rows in acceptance order. It is a cache: fully reconstructible from
//! the log, never consulted for dedup or capacity decisions, and
//! rewritten whole (temp file + atomic rename) so readers never see a
//! half-written table.

use packbox_core::ScanRecord;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors from rendering the export table
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Per-box table derived from the session log
#[derive(Debug, Default, Clone)]
pub struct ExportProjector {
    boxes: BTreeMap<u32, Vec<ScanRecord>>,
}

impl ExportProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the table from a full record history
    pub fn from_records(records: &[ScanRecord]) -> Self {
        let mut projector = Self::new();
        for record in records {
            projector.apply(record.clone());
        }
        projector
    }

    /// Fold one accepted record into the table
    pub fn apply(&mut self, record: ScanRecord) {
        self.boxes.entry(record.box_number).or_default().push(record);
    }

    /// All rows, ordered by box number then acceptance order
    pub fn rows(&self) -> Vec<ScanRecord> {
        self.boxes.values().flatten().cloned().collect()
    }

    /// Rows for a single box
    pub fn box_rows(&self, box_number: u32) -> &[ScanRecord] {
        self.boxes
            .get(&box_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of boxes with at least one row
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Write the table as CSV, replacing any previous artifact
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        write_csv(path, &self.rows())
    }
}

/// Write rows as a CSV artifact via temp file + atomic rename
pub fn write_csv(path: &Path, rows: &[ScanRecord]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("csv.tmp");
    {
        let file = std::fs::File::create(&temp_path)?;
        let mut writer = csv::Writer::from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }

    std::fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
