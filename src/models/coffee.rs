// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Coffee name records powering per-user autocomplete.

use serde::{Deserialize, Serialize};

/// Remembered coffee name, one document per (user, normalized name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coffee {
    /// Coffee name as typed (trimmed)
    pub name: String,
    /// Owner id
    pub uid: String,
    /// Last time a brew used this coffee (RFC3339)
    pub last_used: String,
}

/// Normalize a coffee name for use in a document ID.
///
/// Lowercases, collapses whitespace runs to single hyphens, and strips
/// everything outside `[a-z0-9-]`.
pub fn normalize_coffee_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            pending_hyphen = true;
            continue;
        }
        if pending_hyphen {
            normalized.push('-');
            pending_hyphen = false;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            normalized.push(c);
        }
    }

    normalized
}

/// Deterministic document ID for a coffee: `{uid}_{normalizedName}`.
///
/// Re-using a name updates one record instead of creating duplicates.
pub fn coffee_doc_id(uid: &str, coffee_name: &str) -> String {
    format!("{}_{}", uid, normalize_coffee_name(coffee_name))
}
