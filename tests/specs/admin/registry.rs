//! Resource registry specs
//!
//! Verify register/unregister and their preconditions.

use crate::prelude::*;

#[test]
fn register_announces_new_resources() {
    let mut chat = Chat::new();

    chat.say("alice", "lockbot: register(rig, db)")
        .to(CHANNEL)
        .is(&["alice: REGISTERED, rig, db are now available for locking"]);
    chat.say("alice", "lockbot: register qa")
        .is(&["alice: REGISTERED, qa is now available for locking"]);
}

#[test]
fn register_requires_the_bot_to_be_addressed() {
    let mut chat = Chat::new();

    chat.say("alice", "register(rig)").silent();
    chat.say("alice", "lockbot: list")
        .is(&["alice: There are no registered resources"]);
}

#[test]
fn register_of_a_known_resource_is_an_error() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "lockbot: register(db, rig)").is(&[
        "alice: ERROR, rig is already registered",
        "alice: no resources registered",
    ]);
    chat.say("alice", "lockbot: list")
        .is(&["alice: Registered resources:", " resource:rig"]);
}

#[test]
fn unregister_removes_free_resources() {
    let mut chat = Chat::new().with("rig,db");

    chat.say("alice", "lockbot: unregister(db)")
        .is(&["alice: UNREGISTERED, db is no longer coordinated"]);
    chat.say("alice", "lockbot: list")
        .is(&["alice: Registered resources:", " resource:rig"]);
}

#[test]
fn unregister_of_a_locked_resource_is_denied() {
    let mut chat = Chat::new().with("rig,db");
    chat.say("bob", "lock(rig)");

    chat.say("alice", "lockbot: unregister(db, rig)").is(&[
        "alice: DENIED, rig is already locked by bob",
        "alice: no resources unregistered",
    ]);
    chat.say("alice", "lockbot: list").is(&[
        "alice: Registered resources:",
        " resource:db",
        " resource:rig",
    ]);
}

#[test]
fn unregister_of_an_unknown_resource_is_an_error() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "lockbot: unregister(printer)")
        .is(&["alice: ERROR, printer is not a registered resource"]);
}
