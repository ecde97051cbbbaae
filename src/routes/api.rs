// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated brew journal API.
//!
//! Every handler here runs behind `require_auth`, so the `AuthUser`
//! extension is always present. Ownership beyond authentication is
//! enforced in the service layer.

use axum::{
    extract::{Extension, Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures_util::Stream;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Brew, BrewForm};
use crate::services::{BrewService, CoffeeService};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(me))
        .route("/api/brews", get(list_brews).post(create_brew))
        .route(
            "/api/brews/{id}",
            get(get_brew).put(update_brew).delete(delete_brew),
        )
        .route("/api/brews/{id}/repeat", post(repeat_brew))
        .route("/api/brews/live", get(live_brews))
        .route("/api/coffees", get(list_coffees))
}

/// A brew as returned to clients, with the document id lifted out of the
/// Firestore-internal field.
#[derive(Serialize)]
pub struct BrewResponse {
    pub id: Option<String>,
    #[serde(flatten)]
    pub brew: Brew,
}

impl From<Brew> for BrewResponse {
    fn from(mut brew: Brew) -> Self {
        let id = brew.id.take();
        Self { id, brew }
    }
}

async fn me(Extension(user): Extension<AuthUser>) -> Json<AuthUser> {
    Json(user)
}

async fn list_brews(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<BrewResponse>>> {
    let brews = BrewService::new(state.db.clone())
        .recent_brews(&user.uid)
        .await?;
    Ok(Json(brews.into_iter().map(Into::into).collect()))
}

async fn create_brew(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<BrewForm>,
) -> Result<Json<BrewResponse>> {
    let brew = BrewService::new(state.db.clone())
        .log_brew(&user.uid, form)
        .await?;
    Ok(Json(brew.into()))
}

async fn get_brew(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<BrewResponse>> {
    let brew = BrewService::new(state.db.clone())
        .get_brew(&user.uid, &id)
        .await?;
    Ok(Json(brew.into()))
}

async fn update_brew(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(form): Json<BrewForm>,
) -> Result<Json<BrewResponse>> {
    let brew = BrewService::new(state.db.clone())
        .update_brew(&user.uid, &id, form)
        .await?;
    Ok(Json(brew.into()))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_brew(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    BrewService::new(state.db.clone())
        .delete_brew(&user.uid, &id)
        .await?;
    Ok(Json(DeleteResponse { success: true }))
}

async fn repeat_brew(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<BrewResponse>> {
    let brew = BrewService::new(state.db.clone())
        .repeat_brew(&user.uid, &id)
        .await?;
    Ok(Json(brew.into()))
}

async fn list_coffees(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<String>>> {
    let names = CoffeeService::new(state.db.clone())
        .coffee_names(&user.uid)
        .await?;
    Ok(Json(names))
}

/// Server-sent events stream of the caller's recent brews.
///
/// The first event carries the current list; each subsequent event carries
/// the full replacement list after a change. Holding the `LiveFeed` inside
/// the stream state ties the Firestore listener's lifetime to the SSE
/// connection, so client disconnect tears the listener down.
async fn live_brews(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    let feed = state.db.watch_recent_brews(Some(&user.uid)).await?;
    let rx = feed.subscribe();

    let stream = futures_util::stream::unfold((rx, feed, true), |(mut rx, feed, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }

        let brews: Vec<BrewResponse> = rx
            .borrow_and_update()
            .iter()
            .cloned()
            .map(Into::into)
            .collect();

        match Event::default().event("brews").json_data(&brews) {
            Ok(event) => Some((Ok::<_, Infallible>(event), (rx, feed, false))),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode brews event");
                None
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
