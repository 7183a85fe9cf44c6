// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log for durable storage

use crate::state::{MaterializedState, StoreOp};
use crate::store::{ResourceStore, StoreError};
use lockbot_core::LockRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Append-only log of store operations, one JSON entry per line
pub struct Wal {
    file: File,
    sequence: u64,
}

/// Result of reading a log back
#[derive(Debug, Default)]
pub struct Replay {
    pub ops: Vec<StoreOp>,
    /// Highest sequence number seen
    pub sequence: u64,
    /// The final line was incomplete and was skipped
    pub torn_tail: bool,
}

impl Wal {
    /// Open or create a WAL at the given path, continuing after `sequence`
    pub fn open(path: &Path, sequence: u64) -> Result<Self, StoreError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file, sequence })
    }

    /// Create an empty WAL at `path`, discarding any previous content
    fn open_truncated(path: &Path) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self { file, sequence: 0 })
    }

    /// Append an operation to the log
    pub fn append(&mut self, op: &StoreOp) -> Result<u64, StoreError> {
        self.sequence += 1;
        let entry = WalEntry {
            seq: self.sequence,
            op: op.clone(),
        };
        let line = serde_json::to_string(&entry)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        Ok(self.sequence)
    }

    /// Get the current sequence number
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay all operations from the log
    ///
    /// A final line that fails to parse is treated as a write interrupted by
    /// a crash and skipped. A bad line anywhere else is an error.
    pub fn replay(path: &Path) -> Result<Replay, StoreError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Replay::default()),
            Err(e) => return Err(e.into()),
        };

        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()?;
        let last = lines.iter().rposition(|l| !l.trim().is_empty());

        let mut replay = Replay::default();
        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<WalEntry>(line) {
                Ok(entry) => {
                    replay.sequence = replay.sequence.max(entry.seq);
                    replay.ops.push(entry.op);
                }
                Err(e) if Some(index) == last => {
                    warn!(line = index + 1, error = %e, "skipping torn WAL entry");
                    replay.torn_tail = true;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(replay)
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct WalEntry {
    seq: u64,
    op: StoreOp,
}

/// Resource store persisted through a [`Wal`]
///
/// Every commit is validated against the in-memory table, appended and
/// synced as one log entry, then applied.
pub struct WalStore {
    path: PathBuf,
    wal: Wal,
    state: MaterializedState,
}

impl WalStore {
    /// Open the store at `path`, replaying any existing log
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let replay = Wal::replay(&path)?;

        let mut state = MaterializedState::default();
        for op in &replay.ops {
            state.apply(op);
        }

        let wal = Wal::open(&path, replay.sequence)?;
        let mut store = Self { path, wal, state };
        if replay.torn_tail {
            // appending after a partial line would corrupt the next entry
            store.compact()?;
        }
        Ok(store)
    }

    /// Rewrite the log as the minimal set of operations for the current table
    ///
    /// The new log is written beside the old one and renamed over it.
    pub fn compact(&mut self) -> Result<(), StoreError> {
        let before = self.wal.sequence();
        let tmp_path = self.path.with_extension("compact");

        let mut tmp = Wal::open_truncated(&tmp_path)?;
        for op in self.state.snapshot() {
            tmp.append(&op)?;
        }
        let sequence = tmp.sequence();
        drop(tmp);

        fs::rename(&tmp_path, &self.path)?;
        self.wal = Wal::open(&self.path, sequence)?;
        info!(
            path = %self.path.display(),
            before,
            after = sequence,
            "compacted WAL"
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResourceStore for WalStore {
    fn commit(&mut self, ops: Vec<StoreOp>) -> Result<(), StoreError> {
        let Some(op) = StoreOp::batch(ops) else {
            return Ok(());
        };
        self.state.check(&op)?;
        self.wal.append(&op)?;
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
#[path = "wal_tests.rs"]
mod tests;
