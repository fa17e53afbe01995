// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only view of the latest session
//!
//! Replays the latest log artifact without taking ownership of it, so
//! this is safe to run while no scan session is active.
//!
//! Capacity is not persisted in the log, so the box layout shown here
//! is reconstructed with the configured capacity. A session started
//! with `scan --capacity` may have packed its boxes differently.

use anyhow::Result;
use packbox_core::SessionConfig;
use packbox_storage::{resolve, RestoredState};
use std::fmt::Write as _;

pub fn stats(config: SessionConfig) -> Result<()> {
    print!("{}", render(&config)?);
    Ok(())
}

fn render(config: &SessionConfig) -> Result<String> {
    let resolution = resolve(&config.data_dir, true)?;
    let mut out = String::new();
    if resolution.records.is_empty() {
        writeln!(out, "Session {:04}: empty", resolution.suffix)?;
        return Ok(out);
    }

    let state = RestoredState::from_records(&resolution.records, config.box_capacity);
    writeln!(out, "Session {:04}", resolution.suffix)?;
    writeln!(out, "  total accepted:  {}", state.total_accepted)?;
    writeln!(
        out,
        "  current box:     {} ({}/{} items)",
        state.packer.box_number(),
        state.packer.count(),
        config.box_capacity,
    )?;
    writeln!(
        out,
        "  box capacity:    {} (from config, not the log)",
        config.box_capacity,
    )?;
    Ok(out)
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
