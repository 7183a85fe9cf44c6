// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock semantics over a resource store
//!
//! Every mutating operation runs in two phases. The raw argument is split and
//! resolved against the registered names, then every precondition is checked
//! for every resource before anything is written. A rejection therefore
//! leaves the store untouched.

use crate::reply;
use crate::{CommandError, EngineError, ErrorKind, Operation};
use lockbot_core::{resolve, Identity, LockRecord, Reply, SEPARATOR};
use lockbot_storage::{ResourceStore, StoreError, StoreOp};
use tracing::{debug, info};

/// Who asked, and where answers go
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Normalized identity used for owner and waiter keys
    pub requester: Identity,
    /// Nick as it appears on the transport, used to address replies
    pub nick: String,
    /// Channel or nick replies are sent to
    pub destination: String,
}

impl Invocation {
    pub fn new(sender: &str, destination: impl Into<String>) -> Self {
        let sender = sender.trim();
        let nick = sender.split_once('!').map_or(sender, |(nick, _)| nick);
        Self {
            requester: Identity::from_sender(sender),
            nick: nick.to_string(),
            destination: destination.into(),
        }
    }
}

/// Split on the separator, trimming each name
fn split(raw: &str, op: Operation) -> Result<Vec<String>, CommandError> {
    let mut names: Vec<String> = Vec::new();
    for part in raw.split(SEPARATOR) {
        let name = part.trim();
        if name.is_empty() {
            return Err(CommandError::new(ErrorKind::EmptyResourceName, raw, op));
        }
        if names.iter().any(|n| n == name) {
            return Err(CommandError::new(
                ErrorKind::DuplicateResourceName {
                    name: name.to_string(),
                },
                raw,
                op,
            ));
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Registration conflicts the store reports become rejections; storage
/// failures stay fatal
fn store_error(err: StoreError, raw: &str, op: Operation) -> EngineError {
    let kind = match err {
        StoreError::AlreadyRegistered(name) => ErrorKind::AlreadyRegistered { name },
        StoreError::NotRegistered(name) => ErrorKind::NotRegistered { name },
        err => return err.into(),
    };
    CommandError::new(kind, raw, op).into()
}

/// Group names by a key, keeping first-seen key order
fn group_by_key(pairs: Vec<(String, String)>) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for (key, name) in pairs {
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, names)) => names.push(name),
            None => groups.push((key, vec![name])),
        }
    }
    groups
}

/// The lock coordinator
pub struct LockEngine<S> {
    store: S,
}

impl<S: ResourceStore> LockEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Split `raw` and map every name onto a registered resource
    fn resolve_all(&self, raw: &str, op: Operation) -> Result<Vec<String>, CommandError> {
        let requested = split(raw, op)?;
        let registered = self.store.keys();
        let mut resolved: Vec<String> = Vec::with_capacity(requested.len());
        for name in &requested {
            let Some(found) = resolve(name, &registered) else {
                return Err(CommandError::new(
                    ErrorKind::UnknownResource { name: name.clone() },
                    raw,
                    op,
                ));
            };
            if found != name.as_str() {
                debug!(requested = %name, resolved = %found, "fuzzy-matched resource name");
            }
            if resolved.iter().any(|r| r == found) {
                return Err(CommandError::new(
                    ErrorKind::DuplicateResourceName {
                        name: found.to_string(),
                    },
                    raw,
                    op,
                ));
            }
            resolved.push(found.to_string());
        }
        Ok(resolved)
    }

    /// Resolve `raw` and load the record for every name
    fn records(
        &self,
        raw: &str,
        op: Operation,
    ) -> Result<Vec<(String, LockRecord)>, EngineError> {
        self.resolve_all(raw, op)?
            .into_iter()
            .map(|name| -> Result<_, EngineError> {
                let record = self
                    .store
                    .get(&name)
                    .map_err(|e| store_error(e, raw, op))?;
                Ok((name, record))
            })
            .collect()
    }

    /// Write every op as one unit
    fn commit(
        &mut self,
        ops: Vec<StoreOp>,
        raw: &str,
        op: Operation,
    ) -> Result<(), EngineError> {
        self.store.commit(ops).map_err(|e| store_error(e, raw, op))
    }

    pub fn register(&mut self, ctx: &Invocation, raw: &str) -> Result<Vec<Reply>, EngineError> {
        let op = Operation::Register;
        let names = split(raw, op)?;
        if let Some(name) = names.iter().find(|n| self.store.contains(n)) {
            return Err(CommandError::new(
                ErrorKind::AlreadyRegistered { name: name.clone() },
                raw,
                op,
            )
            .into());
        }

        let ops = names
            .iter()
            .map(|name| StoreOp::Add { name: name.clone() })
            .collect();
        self.commit(ops, raw, op)?;
        info!(%op, requester = %ctx.requester, resources = ?names, "registered");
        Ok(vec![reply::registered(ctx, &names)])
    }

    pub fn unregister(&mut self, ctx: &Invocation, raw: &str) -> Result<Vec<Reply>, EngineError> {
        let op = Operation::Unregister;
        let records = self.records(raw, op)?;
        for (name, record) in &records {
            let kind = if let Some(owner) = record.owner() {
                ErrorKind::OwnedByOther {
                    name: name.clone(),
                    owner: owner.to_string(),
                }
            } else if !record.waiters().is_empty() {
                ErrorKind::HasWaiters {
                    name: name.clone(),
                    waiters: record.waiters().to_vec(),
                }
            } else {
                continue;
            };
            return Err(CommandError::new(kind, raw, op).into());
        }

        let names: Vec<String> = records.into_iter().map(|(name, _)| name).collect();
        let ops = names
            .iter()
            .map(|name| StoreOp::Remove { name: name.clone() })
            .collect();
        self.commit(ops, raw, op)?;
        info!(%op, requester = %ctx.requester, resources = ?names, "unregistered");
        Ok(vec![reply::unregistered(ctx, &names)])
    }

    /// Take every named lock, or none if any is held by someone
    pub fn lock(&mut self, ctx: &Invocation, raw: &str) -> Result<Vec<Reply>, EngineError> {
        let holder = ctx.requester.clone();
        self.grant(ctx, &holder, raw, Operation::Lock)
    }

    /// Like [`lock`](Self::lock), evaluated against `assignee`
    pub fn assign(
        &mut self,
        ctx: &Invocation,
        assignee: &str,
        raw: &str,
    ) -> Result<Vec<Reply>, EngineError> {
        let op = Operation::Assign;
        let assignee = assignee.trim();
        if assignee.is_empty() || assignee.contains(SEPARATOR) {
            return Err(CommandError::new(
                ErrorKind::InvalidAssignee {
                    assignee: assignee.to_string(),
                },
                raw,
                op,
            )
            .into());
        }
        let holder = Identity::from_sender(assignee);
        self.grant(ctx, &holder, raw, op)
    }

    fn grant(
        &mut self,
        ctx: &Invocation,
        holder: &Identity,
        raw: &str,
        op: Operation,
    ) -> Result<Vec<Reply>, EngineError> {
        let on_behalf = *holder != ctx.requester;
        let mut records = self.records(raw, op)?;
        for (name, record) in &records {
            let kind = if record.is_owned_by(holder.as_str()) {
                ErrorKind::AlreadyOwnedBySelf {
                    name: name.clone(),
                    assignee: on_behalf.then(|| holder.to_string()),
                }
            } else if let Some(owner) = record.owner() {
                ErrorKind::OwnedByOther {
                    name: name.clone(),
                    owner: owner.to_string(),
                }
            } else {
                continue;
            };
            return Err(CommandError::new(kind, raw, op).into());
        }

        for (_, record) in &mut records {
            record.grant(holder.as_str());
        }
        let ops = records
            .iter()
            .map(|(name, record)| StoreOp::set(name, record))
            .collect();
        self.commit(ops, raw, op)?;
        let names: Vec<String> = records.into_iter().map(|(name, _)| name).collect();
        info!(%op, requester = %ctx.requester, holder = %holder, resources = ?names, "granted");
        if on_behalf {
            Ok(vec![reply::assigned(ctx, holder.as_str(), &names)])
        } else {
            Ok(vec![reply::granted(&ctx.destination, &ctx.nick, &names)])
        }
    }

    /// Take the free locks now and queue for the held ones
    pub fn wait_lock(&mut self, ctx: &Invocation, raw: &str) -> Result<Vec<Reply>, EngineError> {
        let op = Operation::WaitLock;
        let who = ctx.requester.as_str();
        let records = self.records(raw, op)?;
        for (name, record) in &records {
            let kind = if record.is_owned_by(who) {
                ErrorKind::AlreadyOwnedBySelf {
                    name: name.clone(),
                    assignee: None,
                }
            } else if record.is_waiting(who) {
                ErrorKind::AlreadyWaiting { name: name.clone() }
            } else {
                continue;
            };
            return Err(CommandError::new(kind, raw, op).into());
        }

        let mut granted = Vec::new();
        let mut queued = Vec::new();
        let mut ops = Vec::new();
        for (name, mut record) in records {
            if record.is_free() {
                record.grant(who);
                ops.push(StoreOp::set(&name, &record));
                granted.push(name);
            } else {
                let before = record.clone();
                record.enqueue(who);
                ops.push(StoreOp::set(&name, &record));
                queued.push((name, before));
            }
        }
        self.commit(ops, raw, op)?;
        let waiting: Vec<&str> = queued.iter().map(|(name, _)| name.as_str()).collect();
        info!(%op, requester = %ctx.requester, resources = ?granted, waiting = ?waiting, "wait-locked");

        if queued.is_empty() {
            Ok(vec![reply::granted(&ctx.destination, &ctx.nick, &granted)])
        } else {
            Ok(vec![reply::waiting(ctx, &granted, &queued)])
        }
    }

    /// Release held locks and leave queues; released locks pass to the next
    /// waiter
    pub fn unlock(&mut self, ctx: &Invocation, raw: &str) -> Result<Vec<Reply>, EngineError> {
        let op = Operation::Unlock;
        let who = ctx.requester.as_str();
        let records = self.records(raw, op)?;
        for (name, record) in &records {
            let kind = if record.is_owned_by(who) || record.is_waiting(who) {
                continue;
            } else if let Some(owner) = record.owner() {
                ErrorKind::NotOwnerOrWaiter {
                    name: name.clone(),
                    owner: owner.to_string(),
                }
            } else {
                ErrorKind::AlreadyFree { name: name.clone() }
            };
            return Err(CommandError::new(kind, raw, op).into());
        }

        let mut released = Vec::new();
        let mut gave_up = Vec::new();
        let mut handoffs = Vec::new();
        let mut ops = Vec::new();
        for (name, mut record) in records {
            if record.is_owned_by(who) {
                if let Some(next) = record.release().next {
                    handoffs.push((next, name.clone()));
                }
                ops.push(StoreOp::set(&name, &record));
                released.push(name);
            } else {
                record.withdraw(who);
                ops.push(StoreOp::set(&name, &record));
                gave_up.push(name);
            }
        }
        self.commit(ops, raw, op)?;
        info!(%op, requester = %ctx.requester, resources = ?released, gave_up = ?gave_up, "unlocked");

        let mut replies = Vec::new();
        if !released.is_empty() {
            replies.push(reply::released(ctx, &released));
        }
        if !gave_up.is_empty() {
            replies.push(reply::gave_up(ctx, &gave_up));
        }
        replies.extend(self.hand_off(ctx, handoffs));
        Ok(replies)
    }

    /// Release locks whoever holds them
    pub fn free_lock(&mut self, ctx: &Invocation, raw: &str) -> Result<Vec<Reply>, EngineError> {
        let op = Operation::FreeLock;
        let records = self.records(raw, op)?;
        if let Some((name, _)) = records.iter().find(|(_, record)| record.is_free()) {
            return Err(CommandError::new(
                ErrorKind::AlreadyFree { name: name.clone() },
                raw,
                op,
            )
            .into());
        }

        let mut names = Vec::new();
        let mut prior = Vec::new();
        let mut handoffs = Vec::new();
        let mut ops = Vec::new();
        for (name, mut record) in records {
            let release = record.release();
            if let Some(owner) = release.previous {
                prior.push((owner, name.clone()));
            }
            if let Some(next) = release.next {
                handoffs.push((next, name.clone()));
            }
            ops.push(StoreOp::set(&name, &record));
            names.push(name);
        }
        self.commit(ops, raw, op)?;
        info!(%op, requester = %ctx.requester, resources = ?names, "freed");

        let mut replies = vec![reply::released(ctx, &names)];
        replies.extend(
            group_by_key(prior)
                .into_iter()
                .filter(|(owner, _)| owner != ctx.requester.as_str())
                .map(|(owner, names)| reply::force_released(ctx, &owner, &names)),
        );
        replies.extend(self.hand_off(ctx, handoffs));
        Ok(replies)
    }

    /// Grant notices for locks that passed to queued waiters
    fn hand_off(&self, ctx: &Invocation, handoffs: Vec<(String, String)>) -> Vec<Reply> {
        group_by_key(handoffs)
            .into_iter()
            .map(|(next, names)| {
                info!(holder = %next, resources = ?names, "handed off to waiter");
                reply::granted(&ctx.destination, &next, &names)
            })
            .collect()
    }

    pub fn status(&self, ctx: &Invocation) -> Vec<Reply> {
        let locked: Vec<(String, LockRecord)> = self
            .store
            .entries()
            .into_iter()
            .filter(|(_, record)| !record.is_free())
            .collect();
        reply::status(ctx, &locked)
    }

    pub fn list_free(&self, ctx: &Invocation) -> Vec<Reply> {
        let free: Vec<String> = self
            .store
            .entries()
            .into_iter()
            .filter(|(_, record)| record.is_free())
            .map(|(name, _)| name)
            .collect();
        reply::list_free(ctx, &free)
    }

    pub fn list(&self, ctx: &Invocation) -> Vec<Reply> {
        reply::list(ctx, &self.store.keys())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
