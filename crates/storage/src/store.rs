// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource store interface and the in-memory backend

use crate::state::{MaterializedState, StoreOp};
use lockbot_core::LockRecord;
use std::io;
use thiserror::Error;

/// Errors from store operations
///
/// `Io` and `Json` mean the backing storage is broken; the lock engine does
/// not try to recover from them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resource already registered: {0}")]
    AlreadyRegistered(String),
    #[error("resource not registered: {0}")]
    NotRegistered(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable mapping from resource name to lock record
///
/// Names are returned in sorted order.
pub trait ResourceStore: Send {
    /// Apply `ops` in order as one unit
    ///
    /// If any op is invalid nothing is applied. A durable store writes the
    /// whole batch as a single entry, so a crash keeps all of it or none.
    fn commit(&mut self, ops: Vec<StoreOp>) -> Result<(), StoreError>;

    /// Register `name` with an empty record
    fn add(&mut self, name: &str) -> Result<(), StoreError> {
        self.commit(vec![StoreOp::Add {
            name: name.to_string(),
        }])
    }

    /// Delete the record of `name`
    fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        self.commit(vec![StoreOp::Remove {
            name: name.to_string(),
        }])
    }

    fn set(&mut self, name: &str, record: &LockRecord) -> Result<(), StoreError> {
        self.commit(vec![StoreOp::set(name, record)])
    }

    fn get(&self, name: &str) -> Result<LockRecord, StoreError>;

    fn contains(&self, name: &str) -> bool;

    /// All registered names
    fn keys(&self) -> Vec<String>;

    /// All registered names with their records
    fn entries(&self) -> Vec<(String, LockRecord)>;
}

/// Store kept entirely in memory, for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: MaterializedState,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceStore for MemoryStore {
    fn commit(&mut self, ops: Vec<StoreOp>) -> Result<(), StoreError> {
        let Some(op) = StoreOp::batch(ops) else {
            return Ok(());
        };
        self.state.check(&op)?;
        self.state.apply(&op);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<LockRecord, StoreError> {
        self.state.get(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.state.records.contains_key(name)
    }

    fn keys(&self) -> Vec<String> {
        self.state.records.keys().cloned().collect()
    }

    fn entries(&self) -> Vec<(String, LockRecord)> {
        self.state.entries()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
