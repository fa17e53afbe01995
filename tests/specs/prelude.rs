//! Shared helpers for the spec suite

use packbox_core::SessionConfig;
use packbox_engine::{start_session, FakeNotifier, SessionHandle};
use std::sync::Arc;
use tempfile::TempDir;

pub fn test_config(dir: &TempDir, capacity: u32) -> SessionConfig {
    SessionConfig {
        box_capacity: capacity,
        data_dir: dir.path().join("data"),
        export_dir: dir.path().join("export"),
    }
}

pub fn start(config: SessionConfig, resume: bool) -> SessionHandle {
    start_session(config, resume, Arc::new(FakeNotifier::new())).unwrap()
}

/// Distinct valid codes: code-1, code-2, ...
pub fn codes(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("code-{i}")).collect()
}
