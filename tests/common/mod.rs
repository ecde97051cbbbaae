// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use brewlog::config::Config;
use brewlog::db::FirestoreDb;
use brewlog::routes::create_router;
use brewlog::services::GoogleIdentityVerifier;
use brewlog::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the session signing key.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Vec<u8>) {
    let config = Config::test_default();
    let signing_key = config.jwt_signing_key.clone();

    let db = test_db_offline();
    let google_verifier =
        Arc::new(GoogleIdentityVerifier::new(&config).expect("Failed to build verifier"));

    let state = Arc::new(AppState {
        config,
        db,
        google_verifier,
    });

    (create_router(state), signing_key)
}

/// Create a test app backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Vec<u8>) {
    let config = Config::test_default();
    let signing_key = config.jwt_signing_key.clone();

    let db = test_db().await;
    let google_verifier =
        Arc::new(GoogleIdentityVerifier::new(&config).expect("Failed to build verifier"));

    let state = Arc::new(AppState {
        config,
        db,
        google_verifier,
    });

    (create_router(state), signing_key)
}

/// Create a session JWT for tests, signed with the given key.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    brewlog::middleware::auth::create_session_jwt(uid, Some("Test User"), None, signing_key)
        .expect("Failed to create test JWT")
}
