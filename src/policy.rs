// src/policy.rs

//! Access control predicates. Pure functions over already-authenticated
//! actor ids; credential checks happen in the auth middleware, never here.
//!
//! Mutations are additionally enforced at the storage layer by scoping the
//! query to `{id, owner}`, so an unauthorized update attempt surfaces as
//! "not found" instead of confirming the resource exists.

/// An actor may read a response iff they own the parent form or submitted
/// the response themselves.
pub fn can_read_response(actor: i64, form_owner: i64, responder: i64) -> bool {
    actor == form_owner || actor == responder
}

/// Only the owner may mutate a form.
pub fn can_mutate_form(actor: i64, form_owner: i64) -> bool {
    actor == form_owner
}

/// Forms are publicly readable by id to support the public fill link.
/// Only mutation and response listing are owner-gated.
pub fn can_read_form(_actor: Option<i64>) -> bool {
    true
}
