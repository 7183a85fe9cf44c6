// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed chat commands

/// A command recognized in a chat line
///
/// `resources` fields hold the raw comma-separated argument exactly as typed
/// (minus surrounding whitespace); splitting and validation happen in the
/// lock engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Take every named lock or none of them
    Lock { resources: String },
    /// Take the free locks and queue for the held ones
    WaitLock { resources: String },
    /// Release held locks and leave queues
    Unlock { resources: String },
    /// Give locks to `assignee` on the caller's behalf
    Assign { assignee: String, resources: String },
    /// Release locks regardless of who holds them
    FreeLock { resources: String },
    Register { resources: String },
    Unregister { resources: String },
    Status,
    ListFree,
    List,
    Help,
    /// `lock` with no argument
    LockUsage,
    /// `unlock` with no argument
    UnlockUsage,
    /// Addressed to the bot but matching no other form
    Unrecognized,
}

impl Command {
    /// Name of the command as typed by users
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lock { .. } | Self::LockUsage => "lock",
            Self::WaitLock { .. } => "waitlock",
            Self::Unlock { .. } | Self::UnlockUsage => "unlock",
            Self::Assign { .. } => "assignlock",
            Self::FreeLock { .. } => "freelock",
            Self::Register { .. } => "register",
            Self::Unregister { .. } => "unregister",
            Self::Status => "status",
            Self::ListFree => "listfree",
            Self::List => "list",
            Self::Help => "help",
            Self::Unrecognized => "unrecognized",
        }
    }
}
