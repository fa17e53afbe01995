// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! packbox-core: domain types and state machines for box-packing sessions
//!
//! This crate provides:
//! - Code validation (trim, empty, too-short)
//! - The full-history dedup set
//! - The box packer state machine with capacity rollover
//! - Session configuration and the persisted scan record shape
//!
//! Everything here is pure: no file I/O, no channels, no clocks other
//! than the injectable `Clock` trait.

pub mod clock;
pub mod config;
pub mod dedup;
pub mod packer;
pub mod record;
pub mod validate;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, SessionConfig};
pub use dedup::DedupSet;
pub use packer::{BoxPacker, PackEvent};
pub use record::ScanRecord;
pub use validate::{validate, RejectReason};
