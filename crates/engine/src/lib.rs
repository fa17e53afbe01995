// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! packbox-engine: the session-owning worker
//!
//! One tokio task owns all mutable session state and serializes every
//! acceptance through its command queue. Front-ends (CLI, emulators)
//! are stateless clients holding a [`SessionHandle`].
//!
//! The acceptance transaction, in order: validate, dedup-check, assign
//! a box, durably append to the session log, then commit the in-memory
//! state. Export refresh and notifications are dispatched afterwards as
//! detached best-effort work; they never gate the next acceptance and
//! never feed back into dedup or capacity decisions.

pub mod error;
pub mod notify;
pub mod session;

pub use error::EngineError;
pub use notify::{Notify, ScanNotice, TracingNotifier};
pub use session::{start_session, start_session_with_clock, ScanOutcome, SessionHandle, Stats};

#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifier;
