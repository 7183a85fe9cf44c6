// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered pattern table mapping chat lines to commands
//!
//! Patterns containing `{nick}` are interpolated with the bot's own nick.
//! Directed patterns require the line to start with `<nick>:`; undirected
//! ones make the prefix optional and are kept to `lock`/`unlock`. The nick
//! matches in any case, as on IRC. The first matching pattern wins.

use crate::Command;
use regex::{Captures, Regex};
use thiserror::Error;

/// Errors building the pattern table
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("empty nickname")]
    EmptyNickname,
    #[error("invalid pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

type Build = fn(&Captures<'_>) -> Command;

const OPTIONAL: &str = r"^\s*(?:(?i:{nick}):)?\s*";
const DIRECTED: &str = r"^\s*(?i:{nick}):\s*";

/// (prefix, command body, constructor), in match order
const RULES: &[(&str, &str, Build)] = &[
    (OPTIONAL, r"lock\s*\((.*)\)\s*$", |c| Command::Lock {
        resources: arg(c, 1),
    }),
    (OPTIONAL, r"lock\s+(\S.*)$", |c| Command::Lock {
        resources: arg(c, 1),
    }),
    (OPTIONAL, r"lock\s*$", |_| Command::LockUsage),
    (OPTIONAL, r"unlock\s*\((.*)\)\s*$", |c| Command::Unlock {
        resources: arg(c, 1),
    }),
    (OPTIONAL, r"unlock\s+(\S.*)$", |c| Command::Unlock {
        resources: arg(c, 1),
    }),
    (OPTIONAL, r"unlock\s*$", |_| Command::UnlockUsage),
    (DIRECTED, r"waitlock\s*\((.*)\)\s*$", |c| Command::WaitLock {
        resources: arg(c, 1),
    }),
    (DIRECTED, r"waitlock\s+(\S.*)$", |c| Command::WaitLock {
        resources: arg(c, 1),
    }),
    (
        DIRECTED,
        r"assignlock\s*\(\s*([^,()\s]+)\s*,(.*)\)\s*$",
        |c| Command::Assign {
            assignee: arg(c, 1),
            resources: arg(c, 2),
        },
    ),
    (DIRECTED, r"assignlock\s+([^,\s]+)\s+(\S.*)$", |c| {
        Command::Assign {
            assignee: arg(c, 1),
            resources: arg(c, 2),
        }
    }),
    (DIRECTED, r"freelock\s*\((.*)\)\s*$", |c| Command::FreeLock {
        resources: arg(c, 1),
    }),
    (DIRECTED, r"freelock\s+(\S.*)$", |c| Command::FreeLock {
        resources: arg(c, 1),
    }),
    (DIRECTED, r"register\s*\((.*)\)\s*$", |c| Command::Register {
        resources: arg(c, 1),
    }),
    (DIRECTED, r"register\s+(\S.*)$", |c| Command::Register {
        resources: arg(c, 1),
    }),
    (DIRECTED, r"unregister\s*\((.*)\)\s*$", |c| {
        Command::Unregister {
            resources: arg(c, 1),
        }
    }),
    (DIRECTED, r"unregister\s+(\S.*)$", |c| Command::Unregister {
        resources: arg(c, 1),
    }),
    (DIRECTED, r"(?:status|listlocked)\s*$", |_| Command::Status),
    (DIRECTED, r"listfree\s*$", |_| Command::ListFree),
    (DIRECTED, r"list\s*$", |_| Command::List),
    (DIRECTED, r"help\s*$", |_| Command::Help),
    (DIRECTED, r"", |_| Command::Unrecognized),
];

fn arg(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

struct Binding {
    pattern: Regex,
    build: Build,
}

/// Pattern table compiled for one nickname
pub struct CommandRouter {
    nickname: String,
    bindings: Vec<Binding>,
}

impl CommandRouter {
    pub fn new(nickname: &str) -> Result<Self, RouterError> {
        if nickname.trim().is_empty() {
            return Err(RouterError::EmptyNickname);
        }

        let escaped = regex::escape(nickname);
        let bindings = RULES
            .iter()
            .map(|(prefix, body, build)| {
                let pattern = format!("{}{}", prefix.replace("{nick}", &escaped), body);
                Regex::new(&pattern)
                    .map(|pattern| Binding {
                        pattern,
                        build: *build,
                    })
                    .map_err(|source| RouterError::Pattern { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            nickname: nickname.to_string(),
            bindings,
        })
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Whether `line` already starts with `<nick>:`, in any case
    pub fn is_addressed(&self, line: &str) -> bool {
        let line = line.trim_start();
        let len = self.nickname.len();
        match (line.get(..len), line.get(len..)) {
            (Some(prefix), Some(rest)) => {
                prefix.eq_ignore_ascii_case(&self.nickname) && rest.starts_with(':')
            }
            _ => false,
        }
    }

    /// Match a chat line against the table; `None` if nothing applies
    pub fn route(&self, line: &str) -> Option<Command> {
        let line = line.trim_end_matches(['\r', '\n']);
        self.bindings
            .iter()
            .find_map(|b| b.pattern.captures(line).map(|caps| (b.build)(&caps)))
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
