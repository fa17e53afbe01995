// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the session engine

use packbox_core::ConfigError;
use packbox_storage::{LogError, ResolveError};
use thiserror::Error;

/// Errors surfaced to session clients
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
    /// Append failed; the code was not committed and may be retried
    #[error("log error: {0}")]
    Log(#[from] LogError),
    #[error("session worker unavailable")]
    ChannelClosed,
}
