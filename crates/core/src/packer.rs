// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Box packer state machine
//!
//! The packer is always in `Filling(box_number, count)` with
//! `0 <= count < capacity` between operations: a box that reaches
//! capacity rolls over to the next box number before `accept` returns,
//! so a full box is never the resting state. Box numbers start at 1 and
//! increment by exactly one. There is no terminal state.

use serde::{Deserialize, Serialize};

/// Event produced by a packer transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackEvent {
    /// The named box reached capacity and the packer rolled over
    BoxFull { box_number: u32 },
}

/// The currently filling box
#[derive(Debug, Clone)]
pub struct BoxPacker {
    box_number: u32,
    codes: Vec<String>,
    capacity: u32,
}

impl BoxPacker {
    /// Fresh packer: `Filling(1, 0)`.
    ///
    /// Capacity must already be validated positive (see `SessionConfig`).
    pub fn new(capacity: u32) -> Self {
        Self {
            box_number: 1,
            codes: Vec::new(),
            capacity,
        }
    }

    /// Restore the packer from replayed state.
    ///
    /// `codes` are the contents of the partially filled box in original
    /// acceptance order. Callers roll over themselves when the replayed
    /// box was already full (see the session resolver).
    pub fn restore(box_number: u32, codes: Vec<String>, capacity: u32) -> Self {
        debug_assert!(box_number >= 1);
        debug_assert!((codes.len() as u32) < capacity);
        Self {
            box_number,
            codes,
            capacity,
        }
    }

    /// Accept a code into the current box.
    ///
    /// Returns the box number the code was assigned to, plus the events
    /// produced by the transition (`BoxFull` when the box rolled over).
    pub fn accept(&mut self, code: impl Into<String>) -> (u32, Vec<PackEvent>) {
        // Entry invariant: a full box would have rolled over already
        debug_assert!((self.codes.len() as u32) < self.capacity);

        let assigned = self.box_number;
        self.codes.push(code.into());

        let mut events = Vec::new();
        if self.codes.len() as u32 == self.capacity {
            events.push(PackEvent::BoxFull {
                box_number: self.box_number,
            });
            self.box_number += 1;
            self.codes.clear();
        }

        (assigned, events)
    }

    pub fn box_number(&self) -> u32 {
        self.box_number
    }

    /// Items in the currently filling box
    pub fn count(&self) -> u32 {
        self.codes.len() as u32
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Codes in the currently filling box, in acceptance order
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

#[cfg(test)]
#[path = "packer_tests.rs"]
mod tests;
