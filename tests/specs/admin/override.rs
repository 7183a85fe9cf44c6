//! Override specs
//!
//! Verify assignlock and freelock act on other people's locks.

use crate::prelude::*;

#[test]
fn assignlock_grants_on_behalf_of_someone() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "lockbot: assignlock(bob, rig)")
        .is(&["bob: GRANTED, alice gave you rig's lock"]);
    assert_eq!(chat.locked(), [" resource:rig owner:bob"]);
}

#[test]
fn assignlock_with_spaces_grants_several_locks() {
    let mut chat = Chat::new().with("rig,db");

    chat.say("alice", "lockbot: assignlock bob rig,db")
        .is(&["bob: GRANTED, alice gave you the locks on rig, db"]);
}

#[test]
fn assignlock_to_the_current_owner_is_an_error() {
    let mut chat = Chat::new().with("rig");
    chat.say("bob", "lock(rig)");

    chat.say("alice", "lockbot: assignlock(bob, rig)")
        .is(&["alice: ERROR, bob already holds the lock on rig"]);
}

#[test]
fn assignlock_of_a_held_resource_is_denied() {
    let mut chat = Chat::new().with("rig");
    chat.say("carol", "lock(rig)");

    chat.say("alice", "lockbot: assignlock(bob, rig)")
        .is(&["alice: DENIED, rig is already locked by carol"]);
}

#[test]
fn freelock_releases_someone_elses_lock() {
    let mut chat = Chat::new().with("rig");
    chat.say("bob", "lock(rig)");

    chat.say("alice", "lockbot: freelock(rig)").is(&[
        "alice: RELEASED, rig's lock is free",
        "bob: your lock on rig has been released by alice",
    ]);
    chat.say("observer", "lockbot: status")
        .is(&["observer: There are no locked resources"]);
}

#[test]
fn freelock_hands_the_lock_to_the_first_waiter() {
    let mut chat = Chat::new().with("rig,db");
    chat.say("bob", "lock(rig, db)");
    chat.say("carol", "lockbot: waitlock(db)");

    chat.say("alice", "lockbot: freelock(rig, db)").is(&[
        "alice: RELEASED, locks on rig, db are free",
        "bob: your locks on rig, db have been released by alice",
        "carol: GRANTED, db's lock is all yours now",
    ]);
    assert_eq!(chat.locked(), [" resource:db owner:carol"]);
}

#[test]
fn freelock_of_your_own_lock_sends_no_notice() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");

    chat.say("alice", "lockbot: freelock(rig)")
        .is(&["alice: RELEASED, rig's lock is free"]);
}

#[test]
fn freelock_of_a_free_resource_is_an_error() {
    let mut chat = Chat::new().with("rig,db");
    chat.say("bob", "lock(rig)");

    chat.say("alice", "lockbot: freelock(rig, db)").is(&[
        "alice: ERROR, db is already free",
        "alice: no resources freed",
    ]);
    assert_eq!(chat.locked(), [" resource:rig owner:bob"]);
}
