// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod brew;
pub mod coffee;

pub use brew::{Brew, BrewForm};
pub use coffee::{coffee_doc_id, normalize_coffee_name, Coffee};
