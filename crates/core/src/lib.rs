// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lockbot-core: shared types for the lock coordinator
//!
//! This crate provides:
//! - The per-resource lock record and its persisted string form
//! - Requester identity normalization
//! - Fuzzy resolution of resource names
//! - The (destination, text) reply pair handed to the chat transport

pub mod identity;
pub mod record;
pub mod reply;
pub mod resolver;

pub use identity::Identity;
pub use record::{LockRecord, Release, SEPARATOR};
pub use reply::Reply;
pub use resolver::{resolve, similarity, MATCH_THRESHOLD};
