// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat session loop and reconnection
//!
//! One inbound message is handled to completion, and all of its replies
//! sent, before the next is read.

use std::time::Duration;

use lockbot_adapters::{ChatAdapter, ChatError, ChatEvent};
use lockbot_commands::RouterError;
use lockbot_engine::{Brain, EngineError};
use lockbot_storage::ResourceStore;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Reason sent with QUIT on shutdown
pub const QUIT_REASON: &str = "shutting down";

/// Errors that end a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("chat error: {0}")]
    Chat(#[from] ChatError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("invalid nickname: {0}")]
    Router(#[from] RouterError),
}

impl SessionError {
    /// Whether reconnecting cannot help
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Chat(_))
    }
}

/// How a session ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Connection lost or closed by the server
    Disconnected,
    /// Shutdown was requested
    Shutdown,
}

fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) -> bool {
    *shutdown.borrow_and_update()
}

/// Connect, then relay messages between the chat and the brain until the
/// connection ends or shutdown is requested
pub async fn run_session<C, S>(
    chat: &mut C,
    brain: &mut Brain<S>,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<SessionEnd, SessionError>
where
    C: ChatAdapter,
    S: ResourceStore,
{
    let nick = chat.connect().await?;
    brain.set_nickname(&nick)?;
    info!(nick = %nick, "session started");

    loop {
        if shutdown_requested(shutdown) {
            chat.quit(QUIT_REASON).await?;
            return Ok(SessionEnd::Shutdown);
        }

        let event = tokio::select! {
            event = chat.next_event() => event?,
            changed = shutdown.changed() => {
                // A dropped sender can never signal again; treat it as a request
                if changed.is_err() {
                    chat.quit(QUIT_REASON).await?;
                    return Ok(SessionEnd::Shutdown);
                }
                continue;
            }
        };

        match event {
            None => return Ok(SessionEnd::Disconnected),
            Some(ChatEvent::NickChanged(nick)) => brain.set_nickname(&nick)?,
            Some(ChatEvent::Message(message)) => {
                let replies = brain.process(&message.sender, &message.target, &message.text)?;
                for reply in replies {
                    chat.send(&reply.destination, &reply.text).await?;
                }
            }
        }
    }
}

/// Run sessions until shutdown, waiting `reconnect_delay` after each lost
/// connection. Returns an error only for failures reconnecting cannot fix.
pub async fn serve<C, S>(
    chat: &mut C,
    brain: &mut Brain<S>,
    reconnect_delay: Duration,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<(), SessionError>
where
    C: ChatAdapter,
    S: ResourceStore,
{
    loop {
        match run_session(chat, brain, shutdown).await {
            Ok(SessionEnd::Shutdown) => return Ok(()),
            Ok(SessionEnd::Disconnected) => warn!("disconnected"),
            Err(e) if e.is_fatal() => {
                error!(error = %e, "session failed");
                return Err(e);
            }
            Err(e) => warn!(error = %e, "session failed"),
        }

        if shutdown_requested(shutdown) {
            return Ok(());
        }
        info!(delay = ?reconnect_delay, "reconnecting");
        tokio::select! {
            _ = tokio::time::sleep(reconnect_delay) => {}
            changed = shutdown.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
