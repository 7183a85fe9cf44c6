// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Chat command grammar for the lock coordinator

mod command;
mod help;
mod router;

pub use command::Command;
pub use help::{help_lines, HelpEntry, OPERATIONS};
pub use router::{CommandRouter, RouterError};
