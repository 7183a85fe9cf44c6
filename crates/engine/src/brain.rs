// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-message dispatch: one inbound chat line in, replies out

use crate::reply;
use crate::{EngineError, Invocation, LockEngine};
use lockbot_commands::{Command, CommandRouter, RouterError};
use lockbot_core::Reply;
use lockbot_storage::ResourceStore;
use tracing::{debug, info_span};

/// Routes chat lines to the lock engine
pub struct Brain<S> {
    router: CommandRouter,
    engine: LockEngine<S>,
}

impl<S: ResourceStore> Brain<S> {
    pub fn new(nickname: &str, store: S) -> Result<Self, RouterError> {
        Ok(Self {
            router: CommandRouter::new(nickname)?,
            engine: LockEngine::new(store),
        })
    }

    pub fn nickname(&self) -> &str {
        self.router.nickname()
    }

    /// Rebuild the pattern table for the nick the server actually granted
    pub fn set_nickname(&mut self, nickname: &str) -> Result<(), RouterError> {
        if nickname != self.router.nickname() {
            self.router = CommandRouter::new(nickname)?;
        }
        Ok(())
    }

    pub fn engine(&self) -> &LockEngine<S> {
        &self.engine
    }

    /// Handle one message from `sender` posted to `target`.
    ///
    /// Rejections become replies; only store failures are returned as errors.
    pub fn process(
        &mut self,
        sender: &str,
        target: &str,
        text: &str,
    ) -> Result<Vec<Reply>, EngineError> {
        let nick = sender.split_once('!').map_or(sender, |(nick, _)| nick).trim();
        if nick.eq_ignore_ascii_case(self.nickname()) {
            return Ok(Vec::new());
        }

        let private = target.eq_ignore_ascii_case(self.nickname());
        let (destination, line) = if private && !self.router.is_addressed(text) {
            (nick, format!("{}: {}", self.nickname(), text.trim_start()))
        } else if private {
            (nick, text.to_string())
        } else {
            (target, text.to_string())
        };

        let Some(command) = self.router.route(&line) else {
            return Ok(Vec::new());
        };
        let ctx = Invocation::new(sender, destination);
        let span = info_span!(
            "command",
            command = command.name(),
            requester = %ctx.requester,
            destination = %ctx.destination,
        );
        let _guard = span.enter();

        match self.execute(&ctx, command) {
            Err(EngineError::Rejected(err)) => {
                debug!(kind = ?err.kind, raw = %err.raw, "command rejected");
                Ok(reply::rejection(&ctx, &err))
            }
            result => result,
        }
    }

    fn execute(&mut self, ctx: &Invocation, command: Command) -> Result<Vec<Reply>, EngineError> {
        let engine = &mut self.engine;
        match command {
            Command::Lock { resources } => engine.lock(ctx, &resources),
            Command::WaitLock { resources } => engine.wait_lock(ctx, &resources),
            Command::Unlock { resources } => engine.unlock(ctx, &resources),
            Command::Assign {
                assignee,
                resources,
            } => engine.assign(ctx, &assignee, &resources),
            Command::FreeLock { resources } => engine.free_lock(ctx, &resources),
            Command::Register { resources } => engine.register(ctx, &resources),
            Command::Unregister { resources } => engine.unregister(ctx, &resources),
            Command::Status => Ok(engine.status(ctx)),
            Command::ListFree => Ok(engine.list_free(ctx)),
            Command::List => Ok(engine.list(ctx)),
            Command::Help => Ok(reply::help(ctx)),
            Command::LockUsage => Ok(reply::usage(ctx, "lock")),
            Command::UnlockUsage => Ok(reply::usage(ctx, "unlock")),
            Command::Unrecognized => Ok(reply::unrecognized(ctx)),
        }
    }
}

#[cfg(test)]
#[path = "brain_tests.rs"]
mod tests;
