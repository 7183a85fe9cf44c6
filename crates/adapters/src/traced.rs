// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::chat::{ChatAdapter, ChatError, ChatEvent};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any ChatAdapter
#[derive(Clone)]
pub struct TracedChatAdapter<C> {
    inner: C,
}

impl<C> TracedChatAdapter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: ChatAdapter> ChatAdapter for TracedChatAdapter<C> {
    async fn connect(&mut self) -> Result<String, ChatError> {
        let span = tracing::info_span!("chat.connect");
        async {
            tracing::info!("connecting");
            let start = std::time::Instant::now();
            let result = self.inner.connect().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(nick) => tracing::info!(nick = %nick, elapsed_ms, "connected"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "connect failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn next_event(&mut self) -> Result<Option<ChatEvent>, ChatError> {
        let result = self.inner.next_event().await;
        match &result {
            Ok(Some(ChatEvent::Message(message))) => tracing::debug!(
                sender = %message.sender,
                target = %message.target,
                text_len = message.text.len(),
                "received"
            ),
            Ok(Some(ChatEvent::NickChanged(nick))) => {
                tracing::info!(nick = %nick, "nick changed")
            }
            Ok(None) => tracing::info!("session ended"),
            Err(e) => tracing::error!(error = %e, "receive failed"),
        }
        result
    }

    async fn send(&mut self, destination: &str, text: &str) -> Result<(), ChatError> {
        let span = tracing::info_span!("chat.send", destination);
        async {
            // Precondition: a destination is a single non-empty token
            if destination.is_empty() || destination.contains(char::is_whitespace) {
                tracing::error!("invalid destination");
                return Err(ChatError::InvalidDestination(destination.to_string()));
            }

            tracing::debug!(text_len = text.len(), "sending");
            let result = self.inner.send(destination, text).await;
            if let Err(e) = &result {
                tracing::error!(error = %e, "send failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn quit(&mut self, reason: &str) -> Result<(), ChatError> {
        let span = tracing::info_span!("chat.quit", reason);
        async {
            let result = self.inner.quit(reason).await;
            // quit() failing is often acceptable (connection already gone)
            match &result {
                Ok(()) => tracing::info!("quit"),
                Err(e) => tracing::warn!(error = %e, "quit failed (may be expected)"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
