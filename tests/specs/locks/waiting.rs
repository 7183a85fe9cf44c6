//! Wait queue specs
//!
//! Verify waitlock queues, hand-off on release and giving up.

use crate::prelude::*;

#[test]
fn waitlock_on_a_free_resource_grants_it() {
    let mut chat = Chat::new().with("rig");

    chat.say("bob", "lockbot: waitlock(rig)")
        .is(&["bob: GRANTED, rig's lock is all yours now"]);
}

#[test]
fn waitlock_queues_behind_the_owner() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");

    chat.say("bob", "lockbot: waitlock(rig)")
        .is(&["bob: WAITING for rig [locked by alice]"]);
    chat.say("carol", "lockbot: waitlock(rig)")
        .is(&["carol: WAITING for rig [locked by alice, waiting: bob]"]);
    assert_eq!(
        chat.locked(),
        [" resource:rig owner:alice waiters:bob,carol"]
    );
}

#[test]
fn waitlock_takes_free_resources_and_queues_for_the_rest() {
    let mut chat = Chat::new().with("rig,db");
    chat.say("alice", "lock(rig)");

    chat.say("bob", "lockbot: waitlock(db, rig)").is(&[
        "bob: GRANTED, db's lock is all yours now (still waiting for rig [locked by alice])",
    ]);
    assert_eq!(
        chat.locked(),
        [
            " resource:db owner:bob",
            " resource:rig owner:alice waiters:bob",
        ]
    );
}

#[test]
fn waitlock_twice_is_an_error() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");
    chat.say("bob", "lockbot: waitlock(rig)");

    chat.say("bob", "lockbot: waitlock(rig)")
        .is(&["bob: ERROR, you are already waiting for rig"]);
}

#[test]
fn waitlock_on_an_owned_resource_is_an_error() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");

    chat.say("alice", "lockbot: waitlock(rig)")
        .is(&["alice: ERROR, you already hold the lock on rig"]);
}

#[test]
fn unlock_hands_the_lock_to_the_first_waiter() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");
    chat.say("bob", "lockbot: waitlock(rig)");
    chat.say("carol", "lockbot: waitlock(rig)");

    chat.say("alice", "unlock(rig)").is(&[
        "alice: RELEASED, rig's lock is free",
        "bob: GRANTED, rig's lock is all yours now",
    ]);
    assert_eq!(chat.locked(), [" resource:rig owner:bob waiters:carol"]);
}

#[test]
fn hand_offs_to_one_waiter_are_announced_together() {
    let mut chat = Chat::new().with("rig,db");
    chat.say("alice", "lock(rig, db)");
    chat.say("bob", "lockbot: waitlock(rig, db)");

    chat.say("alice", "unlock(rig, db)").is(&[
        "alice: RELEASED, locks on rig, db are free",
        "bob: GRANTED, locks on rig, db are all yours now",
    ]);
}

#[test]
fn unlock_while_waiting_gives_up() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");
    chat.say("bob", "lockbot: waitlock(rig)");

    chat.say("bob", "unlock(rig)")
        .is(&["bob: GAVE UP, no longer waiting for rig"]);
    assert_eq!(chat.locked(), [" resource:rig owner:alice"]);
}

#[test]
fn unlock_can_release_and_give_up_at_once() {
    let mut chat = Chat::new().with("rig,db");
    chat.say("alice", "lock(rig)");
    chat.say("bob", "lockbot: waitlock(db, rig)");

    chat.say("bob", "unlock(db, rig)").is(&[
        "bob: RELEASED, db's lock is free",
        "bob: GAVE UP, no longer waiting for rig",
    ]);
}
