// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coffee name bookkeeping for autocomplete.

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::Coffee;

/// Per-user coffee name service.
#[derive(Clone)]
pub struct CoffeeService {
    db: FirestoreDb,
}

impl CoffeeService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Remember a coffee name for `uid`, bumping its last-used timestamp.
    ///
    /// An empty or whitespace-only name is a no-op; returns whether a write
    /// was performed. The document identity is derived from the normalized
    /// name, so repeated names update one record.
    pub async fn upsert_coffee(&self, uid: &str, coffee_name: &str) -> Result<bool> {
        let trimmed = coffee_name.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let coffee = Coffee {
            name: trimmed.to_string(),
            uid: uid.to_string(),
            last_used: chrono::Utc::now().to_rfc3339(),
        };

        self.db.upsert_coffee(&coffee).await?;

        tracing::debug!(uid, name = %coffee.name, "Coffee name upserted");
        Ok(true)
    }

    /// The owner's coffee names, most recently used first.
    pub async fn coffee_names(&self, uid: &str) -> Result<Vec<String>> {
        let coffees = self.db.coffees_for_user(uid).await?;
        Ok(coffees.into_iter().map(|c| c.name).collect())
    }
}
