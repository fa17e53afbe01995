// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scanned code validation
//!
//! Rules applied in order: trim whitespace, reject empty, reject codes
//! shorter than three characters. The code format is otherwise opaque;
//! scanners emit vendor-specific identifiers we do not interpret.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length of a trimmed code
pub const MIN_CODE_LEN: usize = 3;

/// Why a raw scan was rejected before reaching the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("empty code")]
    EmptyCode,
    #[error("code too short (minimum {MIN_CODE_LEN} characters)")]
    TooShort,
}

/// Validate a raw scanned string, returning the trimmed code.
///
/// Pure function: rejection never touches session state.
pub fn validate(raw: &str) -> Result<&str, RejectReason> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(RejectReason::EmptyCode);
    }
    if code.chars().count() < MIN_CODE_LEN {
        return Err(RejectReason::TooShort);
    }
    Ok(code)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
