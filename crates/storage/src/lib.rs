// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lockbot-storage: resource store backends
//!
//! The store is a plain name -> lock record table with no lock semantics.
//! Only one process may write a given WAL; the daemon enforces that with
//! its PID-file lock since the log itself takes no file locks.

mod state;
mod store;
mod wal;

pub use state::{MaterializedState, StoreOp};
pub use store::{MemoryStore, ResourceStore, StoreError};
pub use wal::{Replay, Wal, WalStore};
