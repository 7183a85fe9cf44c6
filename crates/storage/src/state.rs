// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized resource table and the operations that mutate it

use crate::store::StoreError;
use lockbot_core::LockRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single store mutation, as written to the WAL
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreOp {
    Add { name: String },
    Remove { name: String },
    /// `record` is the comma-joined persisted form of a [`LockRecord`]
    Set { name: String, record: String },
    /// Several operations written as one entry, applied in order
    Batch { ops: Vec<StoreOp> },
}

impl StoreOp {
    pub fn set(name: &str, record: &LockRecord) -> Self {
        Self::Set {
            name: name.to_string(),
            record: record.to_string(),
        }
    }

    /// Wrap `ops` so they are logged as one entry; `None` if there are none
    pub fn batch(mut ops: Vec<StoreOp>) -> Option<Self> {
        match ops.len() {
            0 => None,
            1 => ops.pop(),
            _ => Some(Self::Batch { ops }),
        }
    }
}

/// Resource table built by applying operations in order
#[derive(Debug, Default)]
pub struct MaterializedState {
    pub records: BTreeMap<String, LockRecord>,
}

impl MaterializedState {
    pub fn get(&self, name: &str) -> Result<LockRecord, StoreError> {
        self.records
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotRegistered(name.to_string()))
    }

    pub fn entries(&self) -> Vec<(String, LockRecord)> {
        self.records
            .iter()
            .map(|(name, record)| (name.clone(), record.clone()))
            .collect()
    }

    /// Check that `op` is valid against the current table
    ///
    /// A batch is checked op by op against the table as the earlier ops in
    /// it would leave it.
    pub fn check(&self, op: &StoreOp) -> Result<(), StoreError> {
        match op {
            StoreOp::Add { name } if self.records.contains_key(name) => {
                Err(StoreError::AlreadyRegistered(name.clone()))
            }
            StoreOp::Remove { name } | StoreOp::Set { name, .. }
                if !self.records.contains_key(name) =>
            {
                Err(StoreError::NotRegistered(name.clone()))
            }
            StoreOp::Batch { ops } => {
                let mut scratch = MaterializedState {
                    records: self.records.clone(),
                };
                for op in ops {
                    scratch.check(op)?;
                    scratch.apply(op);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Apply an operation to update the table
    ///
    /// Replay applies whatever the log holds, so an `add` of a present name
    /// resets it and a `set` of an absent name registers it.
    pub fn apply(&mut self, op: &StoreOp) {
        match op {
            StoreOp::Add { name } => {
                self.records.insert(name.clone(), LockRecord::new());
            }

            StoreOp::Remove { name } => {
                self.records.remove(name);
            }

            StoreOp::Set { name, record } => {
                let record = match record.parse::<LockRecord>() {
                    Ok(record) => record,
                    Err(never) => match never {},
                };
                self.records.insert(name.clone(), record);
            }

            StoreOp::Batch { ops } => {
                for op in ops {
                    self.apply(op);
                }
            }
        }
    }

    /// Operations that rebuild this table from empty
    pub fn snapshot(&self) -> Vec<StoreOp> {
        let mut ops = Vec::new();
        for (name, record) in &self.records {
            ops.push(StoreOp::Add { name: name.clone() });
            if *record != LockRecord::new() {
                ops.push(StoreOp::set(name, record));
            }
        }
        ops
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
