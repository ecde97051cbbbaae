// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Owner-only document access policy.
//!
//! Firestore evaluates the authoritative copy of this rule table server-side
//! (see `firestore.rules`). This module is the same table as a pure function:
//! the service layer uses it for its own ownership gates, and the conformance
//! tests below assert every allow/deny branch so the two encodings cannot
//! drift apart silently.

/// Document operation, as seen by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

/// Decide whether `requester` may perform `op`.
///
/// - `requester`: authenticated uid, or `None` when unauthenticated.
/// - `existing_uid`: the `uid` of the stored document (reads, updates,
///   deletes); `None` for creates.
/// - `incoming_uid`: the `uid` of the incoming document (creates, updates);
///   `None` for reads and deletes.
///
/// All operations deny when unauthenticated. Read/delete require ownership
/// of the stored document. Create requires the incoming `uid` to match the
/// requester. Update requires both, making `uid` immutable after creation.
pub fn is_allowed(
    op: Operation,
    requester: Option<&str>,
    existing_uid: Option<&str>,
    incoming_uid: Option<&str>,
) -> bool {
    let Some(actor) = requester else {
        return false;
    };

    match op {
        Operation::Read | Operation::Delete => existing_uid == Some(actor),
        Operation::Create => incoming_uid == Some(actor),
        Operation::Update => existing_uid == Some(actor) && incoming_uid == existing_uid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "test-user-123";
    const OTHER: &str = "other-user-456";

    #[test]
    fn test_read_allows_owner() {
        assert!(is_allowed(Operation::Read, Some(OWNER), Some(OWNER), None));
    }

    #[test]
    fn test_read_denies_other_user() {
        assert!(!is_allowed(Operation::Read, Some(OTHER), Some(OWNER), None));
    }

    #[test]
    fn test_read_denies_unauthenticated() {
        assert!(!is_allowed(Operation::Read, None, Some(OWNER), None));
    }

    #[test]
    fn test_create_allows_matching_uid() {
        assert!(is_allowed(Operation::Create, Some(OWNER), None, Some(OWNER)));
    }

    #[test]
    fn test_create_denies_mismatched_uid() {
        assert!(!is_allowed(Operation::Create, Some(OWNER), None, Some(OTHER)));
    }

    #[test]
    fn test_create_denies_unauthenticated() {
        assert!(!is_allowed(Operation::Create, None, None, Some(OWNER)));
    }

    #[test]
    fn test_update_allows_owner_keeping_uid() {
        assert!(is_allowed(
            Operation::Update,
            Some(OWNER),
            Some(OWNER),
            Some(OWNER)
        ));
    }

    #[test]
    fn test_update_denies_uid_change() {
        // Changing uid always fails, even for the owner.
        assert!(!is_allowed(
            Operation::Update,
            Some(OWNER),
            Some(OWNER),
            Some(OTHER)
        ));
    }

    #[test]
    fn test_update_denies_other_user() {
        // Even when the incoming uid is left untouched.
        assert!(!is_allowed(
            Operation::Update,
            Some(OTHER),
            Some(OWNER),
            Some(OWNER)
        ));
    }

    #[test]
    fn test_update_denies_takeover_attempt() {
        // Other user writing themselves in as the new owner.
        assert!(!is_allowed(
            Operation::Update,
            Some(OTHER),
            Some(OWNER),
            Some(OTHER)
        ));
    }

    #[test]
    fn test_update_denies_unauthenticated() {
        assert!(!is_allowed(
            Operation::Update,
            None,
            Some(OWNER),
            Some(OWNER)
        ));
    }

    #[test]
    fn test_delete_allows_owner() {
        assert!(is_allowed(Operation::Delete, Some(OWNER), Some(OWNER), None));
    }

    #[test]
    fn test_delete_denies_other_user() {
        assert!(!is_allowed(Operation::Delete, Some(OTHER), Some(OWNER), None));
    }

    #[test]
    fn test_delete_denies_unauthenticated() {
        assert!(!is_allowed(Operation::Delete, None, Some(OWNER), None));
    }
}
