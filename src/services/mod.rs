// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod brews;
pub mod coffees;
pub mod google_identity;

pub use brews::BrewService;
pub use coffees::CoffeeService;
pub use google_identity::{GoogleIdentityVerifier, IdentityError, VerifiedIdentity};
