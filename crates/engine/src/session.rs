// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session worker and client handle
//!
//! The worker task exclusively owns the packer, dedup set, log writer,
//! and export projector. Clients send commands over an mpsc channel and
//! await oneshot replies, so acceptances are serialized by construction:
//! no two accepts can interleave their append and state-mutation steps.
//!
//! A failed append leaves the dedup set and packer untouched; the code
//! is treated as not-yet-accepted and the caller may retry.

use crate::error::EngineError;
use crate::notify::{Notify, ScanNotice};
use packbox_core::{
    BoxPacker, Clock, DedupSet, PackEvent, RejectReason, ScanRecord, SessionConfig, SystemClock,
};
use packbox_storage::{
    export_path, log_path, resolve, write_csv, ExportProjector, LogError, LogWriter, RestoredState,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Result of submitting one raw scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Committed to the durable log
    Accepted { box_number: u32, code: String },
    /// Failed validation; session state unchanged
    Rejected { reason: RejectReason },
    /// Already accepted earlier in this session; state unchanged
    Duplicate { code: String },
}

/// Point-in-time session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub box_number: u32,
    pub items_in_current_box: u32,
    pub total_accepted: u64,
}

enum Command {
    Accept {
        raw: String,
        reply: oneshot::Sender<Result<ScanOutcome, EngineError>>,
    },
    Stats {
        reply: oneshot::Sender<Stats>,
    },
    ExportSnapshot {
        reply: oneshot::Sender<Vec<ScanRecord>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Client handle to a running session worker
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Command>,
    capacity: u32,
    suffix: u32,
    log_path: PathBuf,
    export_path: PathBuf,
}

impl SessionHandle {
    /// Submit one raw scanned string
    pub async fn accept(&self, raw: impl Into<String>) -> Result<ScanOutcome, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Accept {
                raw: raw.into(),
                reply,
            })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        rx.await.map_err(|_| EngineError::ChannelClosed)?
    }

    /// Current box number, items in it, and total accepted
    pub async fn stats(&self) -> Result<Stats, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Stats { reply })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        rx.await.map_err(|_| EngineError::ChannelClosed)
    }

    /// Read-only projection of the export table
    pub async fn export_snapshot(&self) -> Result<Vec<ScanRecord>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::ExportSnapshot { reply })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        rx.await.map_err(|_| EngineError::ChannelClosed)
    }

    /// Drain the worker and flush pending export writes
    ///
    /// Writes nothing extra and transitions nothing: starting a new
    /// session is the only closing act a session ever gets.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Shutdown { reply })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        rx.await.map_err(|_| EngineError::ChannelClosed)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Numeric suffix of the session artifact this worker appends to
    pub fn suffix(&self) -> u32 {
        self.suffix
    }

    pub fn log_path(&self) -> &std::path::Path {
        &self.log_path
    }

    pub fn export_path(&self) -> &std::path::Path {
        &self.export_path
    }
}

/// Start a session worker with the system clock
pub fn start_session(
    config: SessionConfig,
    resume: bool,
    notifier: Arc<dyn Notify>,
) -> Result<SessionHandle, EngineError> {
    start_session_with_clock(config, resume, notifier, SystemClock)
}

/// Start a session worker with an injected clock
///
/// Resolves the session artifact (fresh or replayed), primes the dedup
/// set and packer, then spawns the worker and export tasks. Must be
/// called within a tokio runtime.
pub fn start_session_with_clock<C: Clock + 'static>(
    config: SessionConfig,
    resume: bool,
    notifier: Arc<dyn Notify>,
    clock: C,
) -> Result<SessionHandle, EngineError> {
    config.validate()?;

    let resolution = resolve(&config.data_dir, resume)?;
    let restored = RestoredState::from_records(&resolution.records, config.box_capacity);

    let log_path = log_path(&config.data_dir, resolution.suffix);
    let export_path = export_path(&config.export_dir, resolution.suffix);
    let writer = LogWriter::open(&log_path)?;
    let projector = ExportProjector::from_records(&resolution.records);

    tracing::info!(
        suffix = resolution.suffix,
        resumed = resume && !resolution.records.is_empty(),
        box_number = restored.packer.box_number(),
        total_accepted = restored.total_accepted,
        "session started"
    );

    let (export_tx, export_rx) = mpsc::unbounded_channel();
    let export_task = spawn_export_task(export_path.clone(), export_rx);

    // Seed the export artifact so a resumed (or brand new) session has a
    // table on disk before the first scan
    let _ = export_tx.send(projector.rows());

    let worker = SessionWorker {
        capacity: config.box_capacity,
        packer: restored.packer,
        dedup: restored.dedup,
        total_accepted: restored.total_accepted,
        writer,
        projector,
        export_tx: Some(export_tx),
        export_task: Some(export_task),
        notifier,
        clock,
    };

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(worker.run(rx));

    Ok(SessionHandle {
        tx,
        capacity: config.box_capacity,
        suffix: resolution.suffix,
        log_path,
        export_path,
    })
}

/// Sequential CSV rewrites, decoupled from the acceptance path
fn spawn_export_task(
    path: PathBuf,
    mut rx: mpsc::UnboundedReceiver<Vec<ScanRecord>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(rows) = rx.recv().await {
            let write_path = path.clone();
            let result =
                tokio::task::spawn_blocking(move || write_csv(&write_path, &rows)).await;
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(path = %path.display(), error = %e, "export write failed")
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "export task panicked")
                }
            }
        }
    })
}

/// Durable append target for the acceptance transaction
///
/// [`LogWriter`] is the production sink; tests substitute one that
/// fails on demand to drive the append-error path.
trait AppendLog: Send + 'static {
    fn append(&mut self, record: ScanRecord) -> Result<u64, LogError>;
}

impl AppendLog for LogWriter {
    fn append(&mut self, record: ScanRecord) -> Result<u64, LogError> {
        LogWriter::append(self, record)
    }
}

struct SessionWorker<C: Clock, W: AppendLog> {
    capacity: u32,
    packer: BoxPacker,
    dedup: DedupSet,
    total_accepted: u64,
    writer: W,
    projector: ExportProjector,
    export_tx: Option<mpsc::UnboundedSender<Vec<ScanRecord>>>,
    export_task: Option<JoinHandle<()>>,
    notifier: Arc<dyn Notify>,
    clock: C,
}

impl<C: Clock + 'static, W: AppendLog> SessionWorker<C, W> {
    async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Accept { raw, reply } => {
                    let _ = reply.send(self.handle_accept(&raw));
                }
                Command::Stats { reply } => {
                    let _ = reply.send(Stats {
                        box_number: self.packer.box_number(),
                        items_in_current_box: self.packer.count(),
                        total_accepted: self.total_accepted,
                    });
                }
                Command::ExportSnapshot { reply } => {
                    let _ = reply.send(self.projector.rows());
                }
                Command::Shutdown { reply } => {
                    // Close the export channel and wait for pending
                    // rewrites before acknowledging
                    self.export_tx = None;
                    if let Some(task) = self.export_task.take() {
                        let _ = task.await;
                    }
                    let _ = reply.send(());
                    break;
                }
            }
        }
    }

    /// The acceptance transaction: validate, dedup, assign, append,
    /// commit, then dispatch side effects
    fn handle_accept(&mut self, raw: &str) -> Result<ScanOutcome, EngineError> {
        let code = match packbox_core::validate(raw) {
            Ok(code) => code.to_string(),
            Err(reason) => {
                self.dispatch_notice(ScanNotice::Rejected { reason });
                return Ok(ScanOutcome::Rejected { reason });
            }
        };

        if self.dedup.is_duplicate(&code) {
            self.dispatch_notice(ScanNotice::Duplicate { code: code.clone() });
            return Ok(ScanOutcome::Duplicate { code });
        }

        let record = ScanRecord::new(self.packer.box_number(), code.clone(), self.clock.now());
        let slot = self.packer.count() + 1;

        // Durability gate: nothing is committed until the append lands
        self.writer.append(record.clone())?;

        self.dedup.record(code.clone());
        let (box_number, events) = self.packer.accept(code.clone());
        self.total_accepted += 1;
        self.projector.apply(record);

        // Side effects: best-effort, never gate the next acceptance
        if let Some(tx) = &self.export_tx {
            let _ = tx.send(self.projector.rows());
        }
        self.dispatch_notice(ScanNotice::Accepted {
            box_number,
            code: code.clone(),
            slot,
            capacity: self.capacity,
        });
        for event in events {
            let PackEvent::BoxFull { box_number } = event;
            tracing::info!(box_number, "box full, rolling over");
            self.dispatch_notice(ScanNotice::BoxFull { box_number });
        }

        Ok(ScanOutcome::Accepted { box_number, code })
    }

    fn dispatch_notice(&self, notice: ScanNotice) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            notifier.notify(notice).await;
        });
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
