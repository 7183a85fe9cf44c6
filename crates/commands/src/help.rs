// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help text

/// One line of the help listing
#[derive(Clone, Copy, Debug)]
pub struct HelpEntry {
    /// Invocation with argument placeholders
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every operation, in the order help lists them
pub const OPERATIONS: &[HelpEntry] = &[
    HelpEntry {
        usage: "lock(RESOURCE[,...])",
        description: "take hold of resource locks, all of them or none",
    },
    HelpEntry {
        usage: "waitlock(RESOURCE[,...])",
        description: "take free locks now and queue for the taken ones",
    },
    HelpEntry {
        usage: "unlock(RESOURCE[,...])",
        description: "release resource locks or stop waiting for them",
    },
    HelpEntry {
        usage: "assignlock(WHO,RESOURCE[,...])",
        description: "take hold of resource locks on behalf of WHO",
    },
    HelpEntry {
        usage: "freelock(RESOURCE[,...])",
        description: "release resource locks even if the caller does not hold them (USE WITH CAUTION)",
    },
    HelpEntry {
        usage: "register(RESOURCE[,...])",
        description: "start coordinating access to new resources",
    },
    HelpEntry {
        usage: "unregister(RESOURCE[,...])",
        description: "stop coordinating resources nobody holds",
    },
    HelpEntry {
        usage: "status",
        description: "display locked resources with their owners and waiters (alias: listlocked)",
    },
    HelpEntry {
        usage: "listfree",
        description: "display resources nobody holds",
    },
    HelpEntry {
        usage: "list",
        description: "display all registered resources",
    },
    HelpEntry {
        usage: "help",
        description: "display this help message",
    },
];

/// Help listing with usages padded to a common width
pub fn help_lines() -> Vec<String> {
    let width = OPERATIONS
        .iter()
        .map(|op| op.usage.len() + 1)
        .max()
        .unwrap_or_default();
    OPERATIONS
        .iter()
        .map(|op| {
            format!(
                " {:<width$} {}",
                format!("{}:", op.usage),
                op.description,
                width = width
            )
        })
        .collect()
}
