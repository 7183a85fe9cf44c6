// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake chat adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ChatAdapter, ChatError, ChatEvent, ChatMessage};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Recorded chat call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCall {
    Connect,
    Send { destination: String, text: String },
    Quit { reason: String },
}

#[derive(Default)]
struct FakeState {
    nick: String,
    connected: bool,
    events: VecDeque<ChatEvent>,
    calls: Vec<ChatCall>,
    connect_failures: VecDeque<String>,
}

/// Scripted chat session: queued events are delivered in order, then the
/// session ends
#[derive(Clone, Default)]
pub struct FakeChatAdapter {
    state: Arc<Mutex<FakeState>>,
}

impl FakeChatAdapter {
    pub fn new(nick: &str) -> Self {
        let adapter = Self::default();
        adapter.lock().nick = nick.to_string();
        adapter
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue an inbound message
    pub fn push_message(&self, sender: &str, target: &str, text: &str) {
        self.push_event(ChatEvent::Message(ChatMessage {
            sender: sender.to_string(),
            target: target.to_string(),
            text: text.to_string(),
        }));
    }

    pub fn push_event(&self, event: ChatEvent) {
        self.lock().events.push_back(event);
    }

    /// Make the next connect attempt fail
    pub fn fail_next_connect(&self, reason: &str) {
        self.lock().connect_failures.push_back(reason.to_string());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ChatCall> {
        self.lock().calls.clone()
    }

    /// (destination, text) of every message sent, in order
    pub fn sent(&self) -> Vec<(String, String)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ChatCall::Send { destination, text } => {
                    Some((destination.clone(), text.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatAdapter for FakeChatAdapter {
    async fn connect(&mut self) -> Result<String, ChatError> {
        let mut state = self.lock();
        state.calls.push(ChatCall::Connect);
        if let Some(reason) = state.connect_failures.pop_front() {
            return Err(ChatError::Closed(reason));
        }
        state.connected = true;
        Ok(state.nick.clone())
    }

    async fn next_event(&mut self) -> Result<Option<ChatEvent>, ChatError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(ChatError::NotConnected);
        }
        let event = state.events.pop_front();
        match &event {
            Some(ChatEvent::NickChanged(nick)) => state.nick = nick.clone(),
            Some(ChatEvent::Message(_)) => {}
            None => state.connected = false,
        }
        Ok(event)
    }

    async fn send(&mut self, destination: &str, text: &str) -> Result<(), ChatError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(ChatError::NotConnected);
        }
        state.calls.push(ChatCall::Send {
            destination: destination.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn quit(&mut self, reason: &str) -> Result<(), ChatError> {
        let mut state = self.lock();
        state.calls.push(ChatCall::Quit {
            reason: reason.to_string(),
        });
        state.connected = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
