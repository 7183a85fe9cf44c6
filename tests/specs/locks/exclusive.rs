//! Exclusive lock specs
//!
//! Verify lock/unlock ownership, all-or-nothing semantics and rejections.

use crate::prelude::*;

#[test]
fn lock_grants_a_free_resource() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "lock(rig)")
        .to(CHANNEL)
        .is(&["alice: GRANTED, rig's lock is all yours now"]);
    assert_eq!(chat.locked(), [" resource:rig owner:alice"]);
}

#[test]
fn lock_accepts_the_addressed_form() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "lockbot: lock rig")
        .is(&["alice: GRANTED, rig's lock is all yours now"]);
}

#[test]
fn lock_on_several_resources_grants_them_together() {
    let mut chat = Chat::new().with("rig,db");

    chat.say("alice", "lock(rig, db)")
        .is(&["alice: GRANTED, locks on rig, db are all yours now"]);
}

#[test]
fn lock_held_by_someone_else_is_denied() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");

    chat.say("bob", "lock(rig)")
        .is(&["bob: DENIED, rig is already locked by alice"]);
    assert_eq!(chat.locked(), [" resource:rig owner:alice"]);
}

#[test]
fn lock_is_all_or_nothing() {
    let mut chat = Chat::new().with("rig,db");
    chat.say("alice", "lock(rig)");

    chat.say("bob", "lock(db, rig)").is(&[
        "bob: DENIED, rig is already locked by alice",
        "bob: no resources locked",
    ]);
    assert_eq!(chat.locked(), [" resource:rig owner:alice"]);
}

#[test]
fn lock_already_held_is_an_error() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");

    chat.say("alice", "lock(rig)")
        .is(&["alice: ERROR, you already hold the lock on rig"]);
}

#[test]
fn trailing_underscores_keep_the_same_owner() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");

    chat.say("alice__", "unlock(rig)")
        .is(&["alice__: RELEASED, rig's lock is free"]);
}

#[test]
fn unlock_releases_the_lock() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");

    chat.say("alice", "unlock(rig)")
        .is(&["alice: RELEASED, rig's lock is free"]);
    chat.say("observer", "lockbot: status")
        .is(&["observer: There are no locked resources"]);
}

#[test]
fn unlock_of_a_free_resource_is_an_error() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "unlock(rig)")
        .is(&["alice: ERROR, rig is already free"]);
}

#[test]
fn unlock_of_someone_elses_lock_is_an_error() {
    let mut chat = Chat::new().with("rig");
    chat.say("alice", "lock(rig)");

    chat.say("bob", "unlock(rig)").is(&[
        "bob: ERROR, alice holds the lock on rig and you are not waiting for it",
    ]);
    assert_eq!(chat.locked(), [" resource:rig owner:alice"]);
}

#[test]
fn bare_lock_shows_usage() {
    let mut chat = Chat::new();

    chat.say("alice", "lock").is(&[
        "alice: were you trying to lock a resource?",
        "alice: if so, try \"lock(<RESOURCE>)\" instead",
    ]);
    chat.say("alice", "unlock").has("were you trying to unlock a resource?");
}

#[test]
fn chatter_is_ignored() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "good morning everyone").silent();
    chat.say("alice", "lockbot is great").silent();
}

#[test]
fn the_bot_ignores_itself() {
    let mut chat = Chat::new().with("rig");

    chat.say("lockbot", "lock(rig)").silent();
    chat.say("LockBot", "lockbot: status").silent();
}
