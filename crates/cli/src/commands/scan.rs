// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive scan loop
//!
//! Reads one code per line from stdin and feeds it to the session
//! worker. The loop is a stateless client: every decision (validation,
//! dedup, box assignment) happens inside the worker.

use anyhow::Result;
use clap::Args;
use packbox_core::SessionConfig;
use packbox_engine::{start_session, ScanOutcome, TracingNotifier};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

#[derive(Args)]
pub struct ScanArgs {
    /// Start a new session instead of resuming the latest
    #[arg(long)]
    pub new: bool,

    /// Override the configured box capacity for this session
    #[arg(long)]
    pub capacity: Option<u32>,
}

pub async fn scan(mut config: SessionConfig, args: ScanArgs) -> Result<()> {
    if let Some(capacity) = args.capacity {
        config.box_capacity = capacity;
    }

    let handle = start_session(config, !args.new, Arc::new(TracingNotifier))?;

    let stats = handle.stats().await?;
    println!(
        "Session {:04}: box {} ({}/{} items), {} accepted so far",
        handle.suffix(),
        stats.box_number,
        stats.items_in_current_box,
        handle.capacity(),
        stats.total_accepted,
    );
    println!("Scan codes, one per line (Ctrl-D to stop):");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match handle.accept(line).await {
            Ok(ScanOutcome::Accepted { box_number, code }) => {
                let stats = handle.stats().await?;
                if stats.box_number > box_number {
                    println!("{code} -> box {box_number} (full, next box {})", stats.box_number);
                } else {
                    println!(
                        "{code} -> box {box_number} ({}/{})",
                        stats.items_in_current_box,
                        handle.capacity(),
                    );
                }
            }
            Ok(ScanOutcome::Duplicate { code }) => println!("duplicate, ignored: {code}"),
            Ok(ScanOutcome::Rejected { reason }) => println!("rejected: {reason}"),
            // Append failures are retryable; the code was not committed
            Err(e) => eprintln!("error, not recorded (retry the scan): {e}"),
        }
    }

    handle.shutdown().await?;
    println!("Session saved to {}", handle.log_path().display());
    Ok(())
}
