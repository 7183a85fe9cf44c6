// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat transport adapters

mod irc;
mod line;

pub use irc::{IrcAdapter, IrcConfig};
pub use line::IrcLine;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ChatCall, FakeChatAdapter};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from chat operations
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not connected")]
    NotConnected,
    #[error("registration timed out")]
    Timeout,
    #[error("server closed the session: {0}")]
    Closed(String),
    #[error("invalid destination: {0:?}")]
    InvalidDestination(String),
}

/// A message posted to a channel or sent privately to the bot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    /// Full sender prefix, e.g. `alice!~alice@example.org`
    pub sender: String,
    /// Channel name, or the bot's own nick for a private message
    pub target: String,
    pub text: String,
}

/// Something the bot needs to react to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEvent {
    Message(ChatMessage),
    /// The server changed the bot's own nick
    NickChanged(String),
}

/// Adapter for a chat session (IRC, or a fake in tests)
#[async_trait]
pub trait ChatAdapter: Send {
    /// Open a session and join the channel; returns the nick the server
    /// granted
    async fn connect(&mut self) -> Result<String, ChatError>;

    /// Next event; `None` once the session has ended
    async fn next_event(&mut self) -> Result<Option<ChatEvent>, ChatError>;

    /// Deliver one line of text to a channel or nick
    async fn send(&mut self, destination: &str, text: &str) -> Result<(), ChatError>;

    /// Leave the session
    async fn quit(&mut self, reason: &str) -> Result<(), ChatError>;
}
