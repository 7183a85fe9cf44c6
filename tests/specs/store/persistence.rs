//! Persistence specs
//!
//! Verify the lock table survives a restart.

use crate::prelude::*;

#[test]
fn locks_and_queues_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locks.wal");

    {
        let mut chat = Chat::persistent(&path).with("rig,db");
        chat.say("alice", "lock(rig)");
        chat.say("bob", "lockbot: waitlock(rig)");
    }

    let mut chat = Chat::persistent(&path);
    assert_eq!(chat.locked(), [" resource:rig owner:alice waiters:bob"]);
    chat.say("alice", "unlock(rig)").is(&[
        "alice: RELEASED, rig's lock is free",
        "bob: GRANTED, rig's lock is all yours now",
    ]);
}

#[test]
fn unregistered_resources_stay_gone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locks.wal");

    {
        let mut chat = Chat::persistent(&path).with("rig,db");
        chat.say("alice", "lockbot: unregister(db)");
    }

    let mut chat = Chat::persistent(&path);
    chat.say("alice", "lockbot: list")
        .is(&["alice: Registered resources:", " resource:rig"]);
}

#[test]
fn rejected_commands_leave_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locks.wal");

    {
        let mut chat = Chat::persistent(&path).with("rig,db");
        chat.say("alice", "lock(db)");
        chat.say("bob", "lock(rig, db)").has("DENIED");
    }

    let mut chat = Chat::persistent(&path);
    assert_eq!(chat.locked(), [" resource:db owner:alice"]);
}
