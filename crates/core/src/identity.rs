// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Requester identity as used for owner and waiter keys

/// Suffix IRC clients append when their nick is still taken by a stale
/// connection (`alice` reconnects as `alice_`).
pub const CONTINUATION_MARKER: char = '_';

/// Normalized identity of a principal
///
/// Two senders that differ only by trailing continuation markers map to the
/// same identity. That also lets an unrelated `alice_` act as `alice`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize a transport sender such as `alice_!~alice@host`.
    ///
    /// Keeps the nick before `!` and strips trailing continuation markers. A
    /// nick made only of markers is kept as-is.
    pub fn from_sender(sender: &str) -> Self {
        let sender = sender.trim();
        let nick = sender.split_once('!').map_or(sender, |(nick, _)| nick);
        let stripped = nick.trim_end_matches(CONTINUATION_MARKER);
        if stripped.is_empty() {
            Self(nick.to_string())
        } else {
            Self(stripped.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
