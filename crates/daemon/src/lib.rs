// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lockbot daemon: configuration, lifecycle and the chat session loop

pub mod config;
pub mod lifecycle;
pub mod session;

pub use config::{Args, ConfigError, Settings};
pub use lifecycle::{startup, Daemon, LifecycleError, Paths};
pub use session::{run_session, serve, SessionEnd, SessionError};
