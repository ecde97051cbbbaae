// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Brew journal operations.
//!
//! Each operation validates input, applies the owner-only policy (the same
//! rule table Firestore enforces server-side), and performs a single write.
//! There are no retries; a failed write surfaces as an error and leaves
//! state unmodified.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Brew, BrewForm};
use crate::policy::{self, Operation};
use crate::services::coffees::CoffeeService;
use crate::validation::validate_brew_form;

/// Brew CRUD service.
#[derive(Clone)]
pub struct BrewService {
    db: FirestoreDb,
    coffees: CoffeeService,
}

impl BrewService {
    pub fn new(db: FirestoreDb) -> Self {
        let coffees = CoffeeService::new(db.clone());
        Self { db, coffees }
    }

    /// Log a new brew for `uid` from a submitted form.
    ///
    /// Exactly one create request is issued, with numeric fields converted
    /// to numbers and `uid` set to the authenticated identity. The coffee
    /// name is remembered for autocomplete afterwards; a failure there is
    /// logged but does not undo the saved brew.
    pub async fn log_brew(&self, uid: &str, form: BrewForm) -> Result<Brew> {
        let errors = validate_brew_form(&form);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let brew = form.into_brew(uid, chrono::Utc::now().to_rfc3339())?;

        if !policy::is_allowed(Operation::Create, Some(uid), None, Some(&brew.uid)) {
            return Err(AppError::Forbidden);
        }

        let created = self.db.create_brew(&brew).await?;

        tracing::info!(
            uid,
            brew_id = created.id.as_deref().unwrap_or("<unknown>"),
            coffee = %created.coffee,
            "Brew logged"
        );

        self.remember_coffee(uid, &created.coffee).await;

        Ok(created)
    }

    /// Fetch a single brew, owner-only.
    pub async fn get_brew(&self, uid: &str, brew_id: &str) -> Result<Brew> {
        let brew = self
            .db
            .get_brew(brew_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Brew {} not found", brew_id)))?;

        if !policy::is_allowed(Operation::Read, Some(uid), Some(&brew.uid), None) {
            return Err(AppError::Forbidden);
        }

        Ok(brew)
    }

    /// The owner's recent brews, newest first, limited to 10.
    pub async fn recent_brews(&self, uid: &str) -> Result<Vec<Brew>> {
        self.db.recent_brews(uid).await
    }

    /// Update an existing brew from a revalidated form.
    ///
    /// `uid` and `date` are carried over from the stored document, so the
    /// owner can never be changed by an update.
    pub async fn update_brew(&self, uid: &str, brew_id: &str, form: BrewForm) -> Result<Brew> {
        let errors = validate_brew_form(&form);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let existing = self
            .db
            .get_brew(brew_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Brew {} not found", brew_id)))?;

        let mut updated = form.into_brew(&existing.uid, existing.date.clone())?;
        updated.id = Some(brew_id.to_string());

        if !policy::is_allowed(
            Operation::Update,
            Some(uid),
            Some(&existing.uid),
            Some(&updated.uid),
        ) {
            return Err(AppError::Forbidden);
        }

        self.db.set_brew(brew_id, &updated).await?;

        tracing::info!(uid, brew_id, "Brew updated");

        self.remember_coffee(uid, &updated.coffee).await;

        Ok(updated)
    }

    /// Delete a brew, owner-only.
    pub async fn delete_brew(&self, uid: &str, brew_id: &str) -> Result<()> {
        let existing = self
            .db
            .get_brew(brew_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Brew {} not found", brew_id)))?;

        if !policy::is_allowed(Operation::Delete, Some(uid), Some(&existing.uid), None) {
            return Err(AppError::Forbidden);
        }

        self.db.delete_brew(brew_id).await?;

        tracing::info!(uid, brew_id, "Brew deleted");
        Ok(())
    }

    /// Log a past brew again: same recipe, fresh timestamp, new document.
    pub async fn repeat_brew(&self, uid: &str, brew_id: &str) -> Result<Brew> {
        let mut copy = self.get_brew(uid, brew_id).await?;
        copy.id = None;
        copy.date = chrono::Utc::now().to_rfc3339();

        let created = self.db.create_brew(&copy).await?;

        tracing::info!(
            uid,
            source_brew_id = brew_id,
            brew_id = created.id.as_deref().unwrap_or("<unknown>"),
            "Brew repeated"
        );

        self.remember_coffee(uid, &created.coffee).await;

        Ok(created)
    }

    /// Best-effort coffee autocomplete upsert after a saved brew.
    async fn remember_coffee(&self, uid: &str, coffee_name: &str) {
        if let Err(e) = self.coffees.upsert_coffee(uid, coffee_name).await {
            tracing::warn!(uid, error = %e, "Failed to remember coffee name, continuing anyway");
        }
    }
}
