//! Query specs
//!
//! Verify status, list, listfree, help and private conversations.

use crate::prelude::*;

#[test]
fn status_lists_locked_resources_by_name() {
    let mut chat = Chat::new().with("web,db,rig");
    chat.say("alice", "lock(web)");
    chat.say("bob", "lock(db)");
    chat.say("carol", "lockbot: waitlock(db)");

    chat.say("alice", "lockbot: status").is(&[
        "alice: Status of locked resources:",
        " resource:db owner:bob waiters:carol",
        " resource:web owner:alice",
    ]);
}

#[test]
fn listlocked_is_an_alias_for_status() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "lockbot: listlocked")
        .is(&["alice: There are no locked resources"]);
}

#[test]
fn listfree_shows_unlocked_resources() {
    let mut chat = Chat::new().with("rig,db");
    chat.say("bob", "lock(rig)");

    chat.say("alice", "lockbot: listfree")
        .is(&["alice: Unlocked resources:", " resource:db"]);
    chat.say("bob", "lock(db)");
    chat.say("alice", "lockbot: listfree")
        .is(&["alice: There are no unlocked resources"]);
}

#[test]
fn help_lists_every_command() {
    let mut chat = Chat::new();

    let said = chat
        .say("alice", "lockbot: help")
        .has("alice: List of lockbot commands:")
        .has("waitlock(RESOURCE[,...])")
        .has("assignlock(WHO,RESOURCE[,...])")
        .has("listfree");
    assert_eq!(said.lines().len(), 12);
}

#[test]
fn unknown_command_shows_help() {
    let mut chat = Chat::new();

    let said = chat.say("alice", "lockbot: dance");
    let lines = said.lines();
    assert_eq!(lines[0], "alice: Unrecognized command");
    assert_eq!(lines[1], "alice: List of lockbot commands:");
}

#[test]
fn private_messages_are_answered_privately() {
    let mut chat = Chat::new().with("rig");

    chat.whisper("alice", "lock(rig)")
        .to("alice")
        .is(&["alice: GRANTED, rig's lock is all yours now"]);
    chat.whisper("alice", "status")
        .to("alice")
        .has(" resource:rig owner:alice");
    chat.whisper("alice", "lockbot: list").to("alice").has(" resource:rig");
}
