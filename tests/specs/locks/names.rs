//! Resource name specs
//!
//! Verify argument splitting, validation and typo tolerance.

use crate::prelude::*;

#[test]
fn empty_name_is_rejected() {
    let mut chat = Chat::new().with("rig,db");

    chat.say("alice", "lock(rig,,db)").is(&[
        "alice: ERROR, empty resource name",
        "alice: no resources locked",
    ]);
    chat.say("alice", "lock()").is(&["alice: ERROR, empty resource name"]);
}

#[test]
fn repeated_name_is_rejected() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "lock(rig, rig)").is(&[
        "alice: ERROR, rig is listed more than once",
        "alice: no resources locked",
    ]);
    chat.say("observer", "lockbot: status")
        .is(&["observer: There are no locked resources"]);
}

#[test]
fn unknown_name_is_rejected() {
    let mut chat = Chat::new().with("rig");

    chat.say("alice", "lock(printer)")
        .is(&["alice: ERROR, printer is not a registered resource"]);
}

#[test]
fn typo_resolves_to_the_closest_resource() {
    let mut chat = Chat::new().with("staging,production");

    chat.say("alice", "lock(stagign)")
        .is(&["alice: GRANTED, staging's lock is all yours now"]);
    assert_eq!(chat.locked(), [" resource:staging owner:alice"]);
}

#[test]
fn ambiguous_typo_is_rejected() {
    let mut chat = Chat::new().with("db1,db2");

    chat.say("alice", "lock(db3)")
        .is(&["alice: ERROR, db3 is not a registered resource"]);
}

#[test]
fn two_typos_of_one_resource_are_a_repeat() {
    let mut chat = Chat::new().with("staging");

    chat.say("alice", "lock(staging, stagin)").is(&[
        "alice: ERROR, staging is listed more than once",
        "alice: no resources locked",
    ]);
}
