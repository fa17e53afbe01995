// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! packbox - barcode box-packing session manager

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, export, scan, stats};
use packbox_core::SessionConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "packbox",
    version,
    about = "Pack scanned codes into fixed-capacity boxes with a durable session log"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "packbox.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan codes interactively from stdin
    Scan(scan::ScanArgs),
    /// Show the state of the latest session
    Stats,
    /// Rebuild the export table from the latest session log
    Export,
    /// Configuration management
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        // Config subcommands operate on the file itself
        Commands::Config(args) => config::config(&cli.config, args),
        Commands::Scan(args) => scan::scan(SessionConfig::load(&cli.config)?, args).await,
        Commands::Stats => stats::stats(SessionConfig::load(&cli.config)?),
        Commands::Export => export::export(SessionConfig::load(&cli.config)?),
    }
}
