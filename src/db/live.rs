// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live query feeds over Firestore listen targets.
//!
//! A [`LiveFeed`] mirrors a filtered/ordered query as an in-memory list for
//! the duration of a subscription: the watch channel is seeded with the
//! initial query result, and every listener event replaces the list with a
//! fresh query snapshot. Refresh failures leave the list unchanged and are
//! reported through `tracing`. Tearing the feed down releases the listener;
//! no further updates are published afterwards.

use crate::db::{collections, FirestoreDb};
use crate::error::AppError;
use crate::models::{Brew, Coffee};
use firestore::{
    FirestoreListenEvent, FirestoreListener, FirestoreListenerTarget,
    FirestoreTempFilesListenStateStorage,
};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::watch;

const BREWS_TARGET_ID: u32 = 1;
const COFFEES_TARGET_ID: u32 = 2;

type DbListener = FirestoreListener<firestore::FirestoreDb, FirestoreTempFilesListenStateStorage>;

/// Handle to a live query subscription.
///
/// Dropping the feed releases the listener as well; `stop` only makes the
/// teardown awaitable.
pub struct LiveFeed<T> {
    rx: watch::Receiver<Vec<T>>,
    listener: Option<DbListener>,
}

impl<T: Clone> LiveFeed<T> {
    /// Snapshot of the current list contents.
    pub fn current(&self) -> Vec<T> {
        self.rx.borrow().clone()
    }

    /// Subscribe to list replacements.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.rx.clone()
    }

    /// Whether a listener is actually open (false for unauthenticated feeds).
    pub fn is_live(&self) -> bool {
        self.listener.is_some()
    }

    /// Release the listener and stop publishing updates.
    pub async fn stop(mut self) {
        if let Some(mut listener) = self.listener.take() {
            if let Err(e) = listener.shutdown().await {
                tracing::warn!(error = %e, "Failed to shut down live query listener");
            }
        }
    }

    fn empty() -> Self {
        let (_tx, rx) = watch::channel(Vec::new());
        Self { rx, listener: None }
    }
}

impl<T> Drop for LiveFeed<T> {
    fn drop(&mut self) {
        if let Some(mut listener) = self.listener.take() {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    let _ = listener.shutdown().await;
                });
            }
        }
    }
}

impl FirestoreDb {
    /// Open a live feed of the owner's recent brews (date desc, limit 10).
    ///
    /// With no authenticated identity the list stays empty and no listener
    /// is opened.
    pub async fn watch_recent_brews(&self, uid: Option<&str>) -> Result<LiveFeed<Brew>, AppError> {
        let Some(uid) = uid else {
            return Ok(LiveFeed::empty());
        };

        let initial = self.recent_brews(uid).await?;
        let (tx, rx) = watch::channel(initial);

        let mut listener = self
            .get_client()?
            .create_listener(listen_state_storage())
            .await
            .map_err(|e| AppError::Database(format!("Failed to create listener: {}", e)))?;

        let filter_uid = uid.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::BREWS)
            .filter(move |q| q.field("uid").eq(filter_uid.clone()))
            .listen()
            .add_target(FirestoreListenerTarget::new(BREWS_TARGET_ID), &mut listener)
            .map_err(|e| AppError::Database(format!("Failed to add listen target: {}", e)))?;

        let db = self.clone();
        let uid = uid.to_string();
        listener
            .start(move |event| {
                let db = db.clone();
                let tx = tx.clone();
                let uid = uid.clone();
                async move {
                    if is_document_event(&event) {
                        match db.recent_brews(&uid).await {
                            Ok(brews) => {
                                let _ = tx.send(brews);
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "Live brews refresh failed");
                            }
                        }
                    }
                    Ok(())
                }
            })
            .await
            .map_err(|e| AppError::Database(format!("Failed to start listener: {}", e)))?;

        Ok(LiveFeed {
            rx,
            listener: Some(listener),
        })
    }

    /// Open a live feed of the owner's coffees (last_used desc).
    pub async fn watch_coffees(&self, uid: Option<&str>) -> Result<LiveFeed<Coffee>, AppError> {
        let Some(uid) = uid else {
            return Ok(LiveFeed::empty());
        };

        let initial = self.coffees_for_user(uid).await?;
        let (tx, rx) = watch::channel(initial);

        let mut listener = self
            .get_client()?
            .create_listener(listen_state_storage())
            .await
            .map_err(|e| AppError::Database(format!("Failed to create listener: {}", e)))?;

        let filter_uid = uid.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::COFFEES)
            .filter(move |q| q.field("uid").eq(filter_uid.clone()))
            .listen()
            .add_target(
                FirestoreListenerTarget::new(COFFEES_TARGET_ID),
                &mut listener,
            )
            .map_err(|e| AppError::Database(format!("Failed to add listen target: {}", e)))?;

        let db = self.clone();
        let uid = uid.to_string();
        listener
            .start(move |event| {
                let db = db.clone();
                let tx = tx.clone();
                let uid = uid.clone();
                async move {
                    if is_document_event(&event) {
                        match db.coffees_for_user(&uid).await {
                            Ok(coffees) => {
                                let _ = tx.send(coffees);
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "Live coffees refresh failed");
                            }
                        }
                    }
                    Ok(())
                }
            })
            .await
            .map_err(|e| AppError::Database(format!("Failed to start listener: {}", e)))?;

        Ok(LiveFeed {
            rx,
            listener: Some(listener),
        })
    }
}

fn is_document_event(event: &FirestoreListenEvent) -> bool {
    matches!(
        event,
        FirestoreListenEvent::DocumentChange(_)
            | FirestoreListenEvent::DocumentDelete(_)
            | FirestoreListenEvent::DocumentRemove(_)
    )
}

/// Each subscription gets its own resume-token directory so concurrent
/// feeds never share listen state.
fn listen_state_storage() -> FirestoreTempFilesListenStateStorage {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    FirestoreTempFilesListenStateStorage::with_temp_dir(
        std::env::temp_dir().join(format!("brewlog-listen-{}", nanos)),
    )
}
