// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification hook for scan outcomes
//!
//! Fire-and-forget side channel: front-ends hang sounds, panels, or
//! nothing at all off these notices. A notifier never affects core
//! correctness and its failures are swallowed.

use async_trait::async_trait;
use packbox_core::RejectReason;

/// What just happened to a scanned code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanNotice {
    Accepted {
        box_number: u32,
        code: String,
        /// Position within the box, 1-based
        slot: u32,
        capacity: u32,
    },
    Duplicate {
        code: String,
    },
    Rejected {
        reason: RejectReason,
    },
    BoxFull {
        box_number: u32,
    },
}

/// Receiver for scan notices
#[async_trait]
pub trait Notify: Send + Sync {
    async fn notify(&self, notice: ScanNotice);
}

/// Default notifier: structured log lines only
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notify for TracingNotifier {
    async fn notify(&self, notice: ScanNotice) {
        match notice {
            ScanNotice::Accepted {
                box_number,
                code,
                slot,
                capacity,
            } => tracing::info!(box_number, slot, capacity, %code, "code accepted"),
            ScanNotice::Duplicate { code } => tracing::warn!(%code, "duplicate code"),
            ScanNotice::Rejected { reason } => tracing::warn!(%reason, "code rejected"),
            ScanNotice::BoxFull { box_number } => tracing::info!(box_number, "box full"),
        }
    }
}

/// Records notices for assertions in tests
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone)]
pub struct FakeNotifier {
    notices: std::sync::Arc<std::sync::Mutex<Vec<ScanNotice>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<ScanNotice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl Notify for FakeNotifier {
    async fn notify(&self, notice: ScanNotice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}
