// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Brewlog: a single-user coffee brewing journal
//!
//! This crate provides the backend API for logging espresso and filter
//! brews, remembering coffee names for autocomplete, and streaming the
//! journal live to the client.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod routes;
pub mod services;
pub mod validation;

use config::Config;
use db::FirestoreDb;
use services::GoogleIdentityVerifier;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub google_verifier: Arc<GoogleIdentityVerifier>,
}
