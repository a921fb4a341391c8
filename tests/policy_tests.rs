// tests/policy_tests.rs

use formbuilder::policy::{can_mutate_form, can_read_form, can_read_response};

const OWNER: i64 = 1;
const RESPONDER: i64 = 2;
const THIRD_PARTY: i64 = 3;

#[test]
fn owner_can_read_any_response_to_their_form() {
    assert!(can_read_response(OWNER, OWNER, RESPONDER));
}

#[test]
fn responder_can_read_their_own_response() {
    assert!(can_read_response(RESPONDER, OWNER, RESPONDER));
}

#[test]
fn third_party_cannot_read_a_response() {
    assert!(!can_read_response(THIRD_PARTY, OWNER, RESPONDER));
}

#[test]
fn only_the_owner_can_mutate_a_form() {
    assert!(can_mutate_form(OWNER, OWNER));
    assert!(!can_mutate_form(RESPONDER, OWNER));
    assert!(!can_mutate_form(THIRD_PARTY, OWNER));
}

#[test]
fn forms_are_publicly_readable() {
    assert!(can_read_form(None));
    assert!(can_read_form(Some(THIRD_PARTY)));
}
