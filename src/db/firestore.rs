// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Brews (logged sessions, server-generated document ids)
//! - Coffees (per-user autocomplete names, deterministic document ids)

use crate::db::{collections, RECENT_BREWS_LIMIT};
use crate::error::AppError;
use crate::models::{coffee_doc_id, Brew, Coffee};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing
        // a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    pub(crate) fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Brew Operations ─────────────────────────────────────────

    /// Create a brew with a server-generated document ID.
    ///
    /// Returns the stored brew with its `id` populated.
    pub async fn create_brew(&self, brew: &Brew) -> Result<Brew, AppError> {
        self.get_client()?
            .fluent()
            .insert()
            .into(collections::BREWS)
            .generate_document_id()
            .object(brew)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a brew by document ID.
    pub async fn get_brew(&self, brew_id: &str) -> Result<Option<Brew>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::BREWS)
            .obj()
            .one(brew_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Overwrite a brew document.
    pub async fn set_brew(&self, brew_id: &str, brew: &Brew) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::BREWS)
            .document_id(brew_id)
            .object(brew)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a brew document.
    pub async fn delete_brew(&self, brew_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::BREWS)
            .document_id(brew_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a user's most recent brews, newest first, limited to 10.
    pub async fn recent_brews(&self, uid: &str) -> Result<Vec<Brew>, AppError> {
        let uid = uid.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::BREWS)
            .filter(move |q| q.field("uid").eq(uid.clone()))
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .limit(RECENT_BREWS_LIMIT)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Coffee Operations ───────────────────────────────────────

    /// Merge-upsert a coffee name record.
    ///
    /// The document ID is derived from (uid, normalized name), so re-using a
    /// name bumps `last_used` on one record instead of creating duplicates.
    /// Only `name`, `uid`, and `last_used` are written; unrelated fields on
    /// the document are left untouched.
    pub async fn upsert_coffee(&self, coffee: &Coffee) -> Result<(), AppError> {
        let doc_id = coffee_doc_id(&coffee.uid, &coffee.name);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(firestore::paths!(Coffee::{name, uid, last_used}))
            .in_col(collections::COFFEES)
            .document_id(&doc_id)
            .object(coffee)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a coffee record by document ID.
    pub async fn get_coffee(&self, doc_id: &str) -> Result<Option<Coffee>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::COFFEES)
            .obj()
            .one(doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's coffees ordered by most recently used.
    pub async fn coffees_for_user(&self, uid: &str) -> Result<Vec<Coffee>, AppError> {
        let uid = uid.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::COFFEES)
            .filter(move |q| q.field("uid").eq(uid.clone()))
            .order_by([("last_used", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
