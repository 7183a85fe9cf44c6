// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Lock coordination engine
//!
//! [`LockEngine`] owns the lock semantics over a [`ResourceStore`],
//! [`reply`] renders outcomes and rejections as chat lines, and [`Brain`]
//! turns one inbound chat line into the replies to send.
//!
//! [`ResourceStore`]: lockbot_storage::ResourceStore

mod brain;
mod engine;
mod error;
pub mod reply;

pub use brain::Brain;
pub use engine::{Invocation, LockEngine};
pub use error::{CommandError, EngineError, ErrorKind, Operation};
