// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rebuild the export table from the latest session log
//!
//! The CSV is a derived cache; this command regenerates it from scratch
//! by full replay, which also repairs a hand-damaged or missing table.

use anyhow::Result;
use packbox_core::SessionConfig;
use packbox_storage::{export_path, resolve, ExportProjector};

pub fn export(config: SessionConfig) -> Result<()> {
    let resolution = resolve(&config.data_dir, true)?;
    let projector = ExportProjector::from_records(&resolution.records);
    let path = export_path(&config.export_dir, resolution.suffix);

    projector.write_to(&path)?;

    println!(
        "Wrote {} rows across {} boxes to {}",
        projector.rows().len(),
        projector.box_count(),
        path.display(),
    );
    Ok(())
}
