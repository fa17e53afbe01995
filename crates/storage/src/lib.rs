// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! packbox-storage: durable session log and derived export tables
//!
//! The session log is the source of truth. Every accepted code is one
//! checksummed JSONL entry, fsync'd before the acceptance is considered
//! committed. State is reconstructed by full replay:
//!
//! ```text
//! ScanRecord → LogEntry → LogWriter → disk (session-NNNN.jsonl)
//!                                          ↓
//!                         LogReader → replay → restored packer + dedup
//!                                          ↓
//!                         ExportProjector → boxes-NNNN.csv (derived)
//! ```
//!
//! Each session owns one log artifact named by a strictly increasing
//! integer suffix. The resolver picks the highest suffix on resume and
//! never consults filesystem modification times.

pub mod entry;
pub mod export;
pub mod reader;
pub mod resolver;
pub mod writer;

pub use entry::LogEntry;
pub use export::{write_csv, ExportError, ExportProjector};
pub use reader::{LogReader, ReadError};
pub use resolver::{
    export_path, latest_suffix, log_path, resolve, ResolveError, Resolution, RestoredState,
};
pub use writer::LogWriter;

use thiserror::Error;

/// Errors from serializing or appending log entries
#[derive(Debug, Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
