// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, shutdown, recovery.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fs2::FileExt;
use lockbot_commands::RouterError;
use lockbot_engine::Brain;
use lockbot_storage::{ResourceStore, StoreError, WalStore};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Settings;

/// Files the daemon keeps under its state directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub state_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Path to the lock table's write-ahead log
    pub wal_path: PathBuf,
}

impl Paths {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            state_dir: state_dir.to_path_buf(),
            lock_path: state_dir.join("lockbotd.pid"),
            log_path: state_dir.join("lockbotd.log"),
            wal_path: state_dir.join("locks.wal"),
        }
    }
}

/// Daemon state during operation
pub struct Daemon {
    pub paths: Paths,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    pub brain: Brain<WalStore>,
    /// When daemon started
    pub start_time: Instant,
}

impl Daemon {
    /// Shutdown the daemon gracefully
    pub fn shutdown(&mut self) {
        info!(
            uptime_secs = self.start_time.elapsed().as_secs(),
            "shutting down daemon"
        );

        if self.paths.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.paths.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // Lock file is released when self.lock_file is dropped
        info!("Daemon shutdown complete");
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid nickname: {0}")]
    Router(#[from] RouterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub fn startup(settings: &Settings) -> Result<Daemon, LifecycleError> {
    let paths = Paths::new(&settings.state_dir);
    match startup_inner(settings, &paths) {
        Ok(daemon) => Ok(daemon),
        Err(LifecycleError::LockFailed(e)) => Err(LifecycleError::LockFailed(e)),
        Err(e) => {
            // Clean up any resources created before failure
            cleanup_on_failure(&paths);
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
fn startup_inner(settings: &Settings, paths: &Paths) -> Result<Daemon, LifecycleError> {
    // 1. Create state directory
    std::fs::create_dir_all(&paths.state_dir)?;

    // 2. Acquire lock file FIRST, without truncating a running daemon's PID
    let mut lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&paths.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // 3. Load the lock table and rewrite the log without history
    let mut store = WalStore::open(&paths.wal_path)?;
    store.compact()?;
    let locked = store
        .entries()
        .iter()
        .filter(|(_, record)| !record.is_free())
        .count();
    info!(
        resources = store.keys().len(),
        locked,
        wal = %paths.wal_path.display(),
        "Loaded lock table"
    );

    let brain = Brain::new(&settings.nick, store)?;

    info!(
        server = %settings.server,
        channel = %settings.channel,
        "Daemon started"
    );

    Ok(Daemon {
        paths: paths.clone(),
        lock_file,
        brain,
        start_time: Instant::now(),
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(paths: &Paths) {
    // Remove PID/lock file
    if paths.lock_path.exists() {
        let _ = std::fs::remove_file(&paths.lock_path);
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
