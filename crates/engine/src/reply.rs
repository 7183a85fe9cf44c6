// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat wording for engine outcomes and rejections
//!
//! Every function returns the lines to send, in order. Wording is singular
//! or plural depending on how many resources the line is about.

use crate::{CommandError, Invocation};
use lockbot_commands::help_lines;
use lockbot_core::{LockRecord, Reply};

fn join(names: &[String]) -> String {
    names.join(", ")
}

/// "rig's lock" or "locks on a, b"
fn locks(names: &[String]) -> String {
    match names {
        [name] => format!("{}'s lock", name),
        _ => format!("locks on {}", join(names)),
    }
}

fn is_are(names: &[String]) -> &'static str {
    if names.len() == 1 {
        "is"
    } else {
        "are"
    }
}

/// Held resource with its current holder and queue
fn contested(name: &str, record: &LockRecord) -> String {
    let owner = record.owner().unwrap_or_default();
    if record.waiters().is_empty() {
        format!("{} [locked by {}]", name, owner)
    } else {
        format!(
            "{} [locked by {}, waiting: {}]",
            name,
            owner,
            join(record.waiters())
        )
    }
}

fn address(ctx: &Invocation, text: impl std::fmt::Display) -> Reply {
    Reply::new(&ctx.destination, format!("{}: {}", ctx.nick, text))
}

/// Ownership granted to `who`, sent to `destination`
pub fn granted(destination: &str, who: &str, names: &[String]) -> Reply {
    Reply::new(
        destination,
        format!(
            "{}: GRANTED, {} {} all yours now",
            who,
            locks(names),
            is_are(names)
        ),
    )
}

/// Ownership granted to `assignee` on the requester's behalf
pub fn assigned(ctx: &Invocation, assignee: &str, names: &[String]) -> Reply {
    Reply::new(
        &ctx.destination,
        format!(
            "{}: GRANTED, {} gave you {}",
            assignee,
            ctx.nick,
            match names {
                [name] => format!("{}'s lock", name),
                _ => format!("the locks on {}", join(names)),
            }
        ),
    )
}

/// Outcome of a waiting lock: some names granted now, the rest queued
pub fn waiting(ctx: &Invocation, granted: &[String], queued: &[(String, LockRecord)]) -> Reply {
    let queued = queued
        .iter()
        .map(|(name, record)| contested(name, record))
        .collect::<Vec<_>>()
        .join(", ");
    if granted.is_empty() {
        address(ctx, format!("WAITING for {}", queued))
    } else {
        address(
            ctx,
            format!(
                "GRANTED, {} {} all yours now (still waiting for {})",
                locks(granted),
                is_are(granted),
                queued
            ),
        )
    }
}

pub fn released(ctx: &Invocation, names: &[String]) -> Reply {
    address(
        ctx,
        format!("RELEASED, {} {} free", locks(names), is_are(names)),
    )
}

pub fn gave_up(ctx: &Invocation, names: &[String]) -> Reply {
    address(
        ctx,
        format!("GAVE UP, no longer waiting for {}", join(names)),
    )
}

/// Tell a prior owner their locks were freed by the requester
pub fn force_released(ctx: &Invocation, owner: &str, names: &[String]) -> Reply {
    let (subject, verb) = match names {
        [name] => (format!("lock on {}", name), "has"),
        _ => (format!("locks on {}", join(names)), "have"),
    };
    Reply::new(
        &ctx.destination,
        format!(
            "{}: your {} {} been released by {}",
            owner, subject, verb, ctx.nick
        ),
    )
}

pub fn registered(ctx: &Invocation, names: &[String]) -> Reply {
    address(
        ctx,
        format!(
            "REGISTERED, {} {} now available for locking",
            join(names),
            is_are(names)
        ),
    )
}

pub fn unregistered(ctx: &Invocation, names: &[String]) -> Reply {
    address(
        ctx,
        format!(
            "UNREGISTERED, {} {} no longer coordinated",
            join(names),
            is_are(names)
        ),
    )
}

/// Owned resources with owner and waiters, sorted by name
pub fn status(ctx: &Invocation, locked: &[(String, LockRecord)]) -> Vec<Reply> {
    if locked.is_empty() {
        return vec![address(ctx, "There are no locked resources")];
    }
    let mut replies = vec![address(ctx, "Status of locked resources:")];
    replies.extend(locked.iter().map(|(name, record)| {
        let mut line = format!(
            " resource:{} owner:{}",
            name,
            record.owner().unwrap_or_default()
        );
        if !record.waiters().is_empty() {
            line.push_str(&format!(" waiters:{}", record.waiters().join(",")));
        }
        Reply::new(&ctx.destination, line)
    }));
    replies
}

fn listing(ctx: &Invocation, header: &str, empty: &str, names: &[String]) -> Vec<Reply> {
    if names.is_empty() {
        return vec![address(ctx, empty)];
    }
    let mut replies = vec![address(ctx, header)];
    replies.extend(
        names
            .iter()
            .map(|name| Reply::new(&ctx.destination, format!(" resource:{}", name))),
    );
    replies
}

pub fn list_free(ctx: &Invocation, names: &[String]) -> Vec<Reply> {
    listing(
        ctx,
        "Unlocked resources:",
        "There are no unlocked resources",
        names,
    )
}

pub fn list(ctx: &Invocation, names: &[String]) -> Vec<Reply> {
    listing(
        ctx,
        "Registered resources:",
        "There are no registered resources",
        names,
    )
}

pub fn help(ctx: &Invocation) -> Vec<Reply> {
    let mut replies = vec![address(ctx, "List of lockbot commands:")];
    replies.extend(
        help_lines()
            .into_iter()
            .map(|line| Reply::new(&ctx.destination, line)),
    );
    replies
}

pub fn unrecognized(ctx: &Invocation) -> Vec<Reply> {
    let mut replies = vec![address(ctx, "Unrecognized command")];
    replies.extend(help(ctx));
    replies
}

/// Hint for `lock`/`unlock` typed without an argument
pub fn usage(ctx: &Invocation, command: &str) -> Vec<Reply> {
    vec![
        address(ctx, format!("were you trying to {} a resource?", command)),
        address(
            ctx,
            format!("if so, try \"{}(<RESOURCE>)\" instead", command),
        ),
    ]
}

/// A rejection; multi-resource arguments get a second line saying nothing
/// was applied
pub fn rejection(ctx: &Invocation, err: &CommandError) -> Vec<Reply> {
    let mut replies = vec![address(ctx, &err.kind)];
    if err.is_multi() {
        replies.push(address(
            ctx,
            format!("no resources {}", err.operation.past_tense()),
        ));
    }
    replies
}

#[cfg(test)]
#[path = "reply_tests.rs"]
mod tests;
