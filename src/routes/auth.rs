// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google sign-in routes.
//!
//! The client runs the Google popup flow itself; a dismissed popup never
//! produces a request here. What arrives is the resulting ID token, which is
//! verified and exchanged for a session JWT cookie.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_session_jwt, SESSION_COOKIE};
use crate::services::IdentityError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", post(google_sign_in))
        .route("/auth/logout", get(logout))
}

#[derive(Deserialize)]
pub struct GoogleSignInRequest {
    /// Google ID token produced by the client-side popup flow.
    pub id_token: String,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: SignInUser,
}

#[derive(Serialize)]
pub struct SignInUser {
    pub uid: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// Verify a Google ID token and mint a session.
async fn google_sign_in(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<GoogleSignInRequest>,
) -> Result<(CookieJar, Json<SignInResponse>)> {
    let identity = state
        .google_verifier
        .verify_id_token(&payload.id_token)
        .await
        .map_err(|e| match e {
            IdentityError::Rejected(msg) => {
                tracing::warn!(error = %msg, "Google sign-in rejected");
                AppError::InvalidToken
            }
            IdentityError::Transient(msg) => {
                AppError::Internal(anyhow::anyhow!("identity verification unavailable: {msg}"))
            }
        })?;

    let token = create_session_jwt(
        &identity.uid,
        identity.name.as_deref(),
        identity.email.as_deref(),
        &state.config.jwt_signing_key,
    )
    .map_err(AppError::Internal)?;

    tracing::info!(uid = %identity.uid, "User signed in");

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(SignInResponse {
            token,
            user: SignInUser {
                uid: identity.uid,
                name: identity.name,
                email: identity.email,
                picture: identity.picture,
            },
        }),
    ))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Clear the session cookie.
///
/// The expired cookie is sent whether or not the request carried one, so
/// logout is idempotent from the client's point of view.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let mut removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    removal.make_removal();
    (jar.add(removal), Json(LogoutResponse { success: true }))
}
