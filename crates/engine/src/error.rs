// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the lock engine

use lockbot_core::SEPARATOR;
use lockbot_storage::StoreError;
use thiserror::Error;

/// Mutating operations, named for error and log text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Register,
    Unregister,
    Lock,
    WaitLock,
    Unlock,
    Assign,
    FreeLock,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Unregister => "unregister",
            Self::Lock => "lock",
            Self::WaitLock => "waitlock",
            Self::Unlock => "unlock",
            Self::Assign => "assignlock",
            Self::FreeLock => "freelock",
        }
    }

    /// Verb used in "no resources <verb>"
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Register => "registered",
            Self::Unregister => "unregistered",
            Self::Lock | Self::WaitLock => "locked",
            Self::Unlock => "unlocked",
            Self::Assign => "assigned",
            Self::FreeLock => "freed",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a command was rejected
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("ERROR, empty resource name")]
    EmptyResourceName,
    #[error("ERROR, {name} is listed more than once")]
    DuplicateResourceName { name: String },
    #[error("ERROR, {name} is not a registered resource")]
    UnknownResource { name: String },
    #[error("ERROR, {name} is already registered")]
    AlreadyRegistered { name: String },
    #[error("ERROR, {name} is not registered")]
    NotRegistered { name: String },
    #[error("ERROR, {assignee} is not a nick locks can be assigned to")]
    InvalidAssignee { assignee: String },
    /// `assignee` is set when the lock was requested on someone else's behalf
    #[error("ERROR, {} the lock on {name}", held_by(.assignee))]
    AlreadyOwnedBySelf {
        name: String,
        assignee: Option<String>,
    },
    #[error("DENIED, {name} is already locked by {owner}")]
    OwnedByOther { name: String, owner: String },
    #[error("ERROR, {name} is already free")]
    AlreadyFree { name: String },
    #[error("ERROR, {owner} holds the lock on {name} and you are not waiting for it")]
    NotOwnerOrWaiter { name: String, owner: String },
    #[error("ERROR, you are already waiting for {name}")]
    AlreadyWaiting { name: String },
    #[error("ERROR, {name} still has waiters: {}", .waiters.join(", "))]
    HasWaiters { name: String, waiters: Vec<String> },
}

fn held_by(assignee: &Option<String>) -> String {
    match assignee {
        Some(who) => format!("{} already holds", who),
        None => "you already hold".to_string(),
    }
}

/// A rejected command: nothing was mutated
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct CommandError {
    pub kind: ErrorKind,
    /// Argument exactly as the requester typed it
    pub raw: String,
    pub operation: Operation,
}

impl CommandError {
    pub fn new(kind: ErrorKind, raw: impl Into<String>, operation: Operation) -> Self {
        Self {
            kind,
            raw: raw.into(),
            operation,
        }
    }

    /// Whether the rejected argument named several resources
    pub fn is_multi(&self) -> bool {
        self.raw.contains(SEPARATOR)
    }
}

/// Errors returned by engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Recoverable; reported back to the requester
    #[error(transparent)]
    Rejected(#[from] CommandError),
    /// Fatal; the store can no longer be trusted
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
