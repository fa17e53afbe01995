// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session resolution and crash recovery by replay
//!
//! Every session owns one log artifact `session-NNNN.jsonl`. The suffix
//! is a strictly increasing integer: the latest session is the highest
//! suffix, decided by numeric comparison alone. Filesystem modification
//! times are never consulted (ties and clock skew make them unreliable).
//!
//! Corruption anywhere in the latest artifact abandons it: the failure
//! is logged and a fresh session starts under the next suffix. Startup
//! never blocks on a bad log.

use crate::reader::LogReader;
use packbox_core::{BoxPacker, DedupSet, ScanRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_PREFIX: &str = "session-";
const LOG_SUFFIX: &str = ".jsonl";

/// Errors from enumerating session artifacts
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Log artifact path for a session suffix
///
/// Zero-padded to four digits for stable directory listings; parsing is
/// numeric, so suffixes beyond 9999 still resolve correctly.
pub fn log_path(data_dir: &Path, suffix: u32) -> PathBuf {
    data_dir.join(format!("{LOG_PREFIX}{suffix:04}{LOG_SUFFIX}"))
}

/// Export artifact path sharing the session suffix
pub fn export_path(export_dir: &Path, suffix: u32) -> PathBuf {
    export_dir.join(format!("boxes-{suffix:04}.csv"))
}

fn parse_suffix(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix(LOG_PREFIX)?
        .strip_suffix(LOG_SUFFIX)?
        .parse()
        .ok()
}

/// Find the highest session suffix in the data directory
///
/// Returns `None` when no session artifacts exist (including when the
/// directory itself does not exist yet).
pub fn latest_suffix(data_dir: &Path) -> Result<Option<u32>, ResolveError> {
    let entries = match std::fs::read_dir(data_dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest = None;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(suffix) = parse_suffix(name) {
            latest = latest.max(Some(suffix));
        }
    }

    Ok(latest)
}

/// The session artifact chosen for this run, with its replayed history
#[derive(Debug)]
pub struct Resolution {
    /// Suffix of the artifact this session will append to
    pub suffix: u32,
    /// Replayed records; empty for a fresh session
    pub records: Vec<ScanRecord>,
}

impl Resolution {
    fn fresh(suffix: u32) -> Self {
        Self {
            suffix,
            records: Vec::new(),
        }
    }
}

/// Locate the session artifact for this run
///
/// A fresh start always claims the next unused suffix. A resume replays
/// the latest artifact; if that artifact is unreadable or corrupt the
/// failure is logged and a fresh session starts under the next suffix.
pub fn resolve(data_dir: &Path, resume: bool) -> Result<Resolution, ResolveError> {
    let latest = latest_suffix(data_dir)?;

    let Some(latest) = latest else {
        return Ok(Resolution::fresh(1));
    };

    if !resume {
        return Ok(Resolution::fresh(latest + 1));
    }

    let path = log_path(data_dir, latest);
    match LogReader::open_or_empty(&path).replay() {
        Ok(records) => Ok(Resolution {
            suffix: latest,
            records,
        }),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "session log unreadable, starting fresh session"
            );
            Ok(Resolution::fresh(latest + 1))
        }
    }
}

/// In-memory state reconstructed from a full replay
#[derive(Debug)]
pub struct RestoredState {
    pub packer: BoxPacker,
    pub dedup: DedupSet,
    pub total_accepted: u64,
}

impl RestoredState {
    /// Rebuild packer and dedup state from replayed records
    ///
    /// The current box is the highest box number seen; its codes are
    /// restored in original order when it is still under capacity,
    /// otherwise the next box starts empty. A replayed box holding
    /// `capacity` or more codes (capacity shrank between sessions) also
    /// starts the next box empty.
    pub fn from_records(records: &[ScanRecord], capacity: u32) -> Self {
        let mut dedup = DedupSet::new();
        dedup.extend(records.iter().map(|r| r.code.clone()));
        let total_accepted = records.len() as u64;

        let Some(max_box) = records.iter().map(|r| r.box_number).max() else {
            return Self {
                packer: BoxPacker::new(capacity),
                dedup,
                total_accepted,
            };
        };

        let current_codes: Vec<String> = records
            .iter()
            .filter(|r| r.box_number == max_box)
            .map(|r| r.code.clone())
            .collect();

        let packer = if (current_codes.len() as u32) < capacity {
            BoxPacker::restore(max_box, current_codes, capacity)
        } else {
            BoxPacker::restore(max_box + 1, Vec::new(), capacity)
        };

        Self {
            packer,
            dedup,
            total_accepted,
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
