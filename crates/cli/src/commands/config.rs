// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration management
//!
//! Capacity changes apply to the next session only; a running session
//! keeps the capacity it was started with.

use anyhow::Result;
use clap::{Args, Subcommand};
use packbox_core::SessionConfig;
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Set the box capacity for future sessions
    SetCapacity { capacity: u32 },
}

pub fn config(path: &Path, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = SessionConfig::load(path)?;
            println!("box_capacity = {}", config.box_capacity);
            println!("data_dir     = {}", config.data_dir.display());
            println!("export_dir   = {}", config.export_dir.display());
        }
        ConfigCommand::SetCapacity { capacity } => {
            let mut config = SessionConfig::load(path)?;
            config.box_capacity = capacity;
            config.validate()?;
            config.save(path)?;
            println!("box_capacity = {capacity} (takes effect for the next session)");
        }
    }
    Ok(())
}
