// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock record: current owner plus a FIFO queue of waiters
//!
//! A record persists as a single comma-joined string. The first field is the
//! owner (empty when unlocked) and every following field is a waiter in queue
//! order, so `"alice,bob,carol"` is owned by alice with bob then carol waiting.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Field separator of the persisted form, also the resource-list separator
/// in command arguments.
pub const SEPARATOR: char = ',';

/// Ownership state of one registered resource
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockRecord {
    owner: Option<String>,
    waiters: Vec<String>,
}

/// Outcome of clearing a record's owner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Release {
    /// Owner before the release
    pub previous: Option<String>,
    /// Waiter that inherited the lock, if the queue was non-empty
    pub next: Option<String>,
}

impl LockRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record held by `owner` with an empty queue
    pub fn owned_by(owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            waiters: Vec::new(),
        }
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn waiters(&self) -> &[String] {
        &self.waiters
    }

    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    pub fn is_owned_by(&self, who: &str) -> bool {
        self.owner.as_deref() == Some(who)
    }

    pub fn is_waiting(&self, who: &str) -> bool {
        self.waiters.iter().any(|w| w == who)
    }

    /// Make `who` the owner, dropping them from the queue if they were in it.
    pub fn grant(&mut self, who: &str) {
        self.waiters.retain(|w| w != who);
        self.owner = Some(who.to_string());
    }

    /// Append `who` to the queue.
    ///
    /// Returns false without changing anything when `who` already owns the
    /// record or is already queued.
    pub fn enqueue(&mut self, who: &str) -> bool {
        if self.is_owned_by(who) || self.is_waiting(who) {
            return false;
        }
        self.waiters.push(who.to_string());
        true
    }

    /// Remove `who` from the queue, returning whether they were queued.
    pub fn withdraw(&mut self, who: &str) -> bool {
        let before = self.waiters.len();
        self.waiters.retain(|w| w != who);
        self.waiters.len() != before
    }

    /// Clear the owner and hand the lock to the head of the queue.
    pub fn release(&mut self) -> Release {
        let previous = self.owner.take();
        let next = if self.waiters.is_empty() {
            None
        } else {
            Some(self.waiters.remove(0))
        };
        self.owner = next.clone();
        Release { previous, next }
    }
}

impl fmt::Display for LockRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.owner.as_deref().unwrap_or_default())?;
        for waiter in &self.waiters {
            write!(f, "{}{}", SEPARATOR, waiter)?;
        }
        Ok(())
    }
}

impl FromStr for LockRecord {
    type Err = Infallible;

    /// Parse the persisted form. Empty waiter fields are skipped, as are
    /// waiters that repeat the owner or an earlier waiter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(SEPARATOR);
        let owner = fields
            .next()
            .filter(|o| !o.is_empty())
            .map(str::to_string);

        let mut record = Self {
            owner,
            waiters: Vec::new(),
        };
        for waiter in fields.filter(|w| !w.is_empty()) {
            record.enqueue(waiter);
        }
        Ok(record)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
