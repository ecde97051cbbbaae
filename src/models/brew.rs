// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Brew session model for storage and form submission.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored brew record in Firestore.
///
/// Numeric fields are stored as numbers; the string-typed [`BrewForm`] is
/// validated and converted before anything is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brew {
    /// Firestore document ID, populated on reads.
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    /// Brewing method (Espresso, Filter, ...)
    pub brew_method: String,
    /// Coffee name
    pub coffee: String,
    /// Dose in grams
    pub coffee_amount: f64,
    /// Grinder setting
    pub grind_setting: f64,
    /// Water in grams
    pub water_amount: f64,
    /// Water temperature in Celsius
    pub temperature: f64,
    /// Brew time in seconds
    pub brew_time: f64,
    /// Free-form tasting notes
    pub notes: String,
    /// Tags for filtering
    pub tags: Vec<String>,
    /// Rating, 0-5
    pub rating: u8,
    /// Creation timestamp (RFC3339, orderable)
    pub date: String,
    /// Owner id; set at creation and never changed
    pub uid: String,
}

/// Brew entry form as submitted by the client.
///
/// Numeric fields arrive as strings and are range-checked by
/// [`crate::validation::validate_brew_form`] before conversion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrewForm {
    #[serde(default)]
    #[validate(custom(function = crate::validation::validate_brew_method))]
    pub brew_method: String,
    #[serde(default)]
    #[validate(
        custom(function = crate::validation::validate_coffee_name),
        length(max = 100, message = "Coffee name must be 100 characters or less")
    )]
    pub coffee: String,
    #[serde(default)]
    #[validate(custom(function = crate::validation::validate_coffee_amount))]
    pub coffee_amount: String,
    #[serde(default)]
    #[validate(custom(function = crate::validation::validate_grind_setting))]
    pub grind_setting: String,
    #[serde(default)]
    #[validate(custom(function = crate::validation::validate_water_amount))]
    pub water_amount: String,
    #[serde(default)]
    #[validate(custom(function = crate::validation::validate_temperature))]
    pub temperature: String,
    #[serde(default)]
    #[validate(custom(function = crate::validation::validate_brew_time))]
    pub brew_time: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_rating")]
    #[validate(range(max = 5, message = "Rating must be between 0 and 5"))]
    pub rating: u8,
}

fn default_rating() -> u8 {
    3
}

impl Default for BrewForm {
    fn default() -> Self {
        Self {
            brew_method: String::new(),
            coffee: String::new(),
            coffee_amount: String::new(),
            grind_setting: String::new(),
            water_amount: String::new(),
            temperature: String::new(),
            brew_time: String::new(),
            notes: String::new(),
            tags: Vec::new(),
            rating: default_rating(),
        }
    }
}

impl BrewForm {
    /// Convert a validated form into a storable [`Brew`] owned by `uid`.
    ///
    /// Callers must run [`crate::validation::validate_brew_form`] first; a
    /// non-numeric field here is still an error, never a panic.
    pub fn into_brew(self, uid: &str, date: String) -> Result<Brew, AppError> {
        Ok(Brew {
            id: None,
            coffee_amount: parse_numeric_field(&self.coffee_amount, "coffee_amount")?,
            grind_setting: parse_numeric_field(&self.grind_setting, "grind_setting")?,
            water_amount: parse_numeric_field(&self.water_amount, "water_amount")?,
            temperature: parse_numeric_field(&self.temperature, "temperature")?,
            brew_time: parse_numeric_field(&self.brew_time, "brew_time")?,
            brew_method: self.brew_method,
            coffee: self.coffee,
            notes: self.notes,
            tags: self.tags,
            rating: self.rating,
            date,
            uid: uid.to_string(),
        })
    }
}

fn parse_numeric_field(value: &str, field: &str) -> Result<f64, AppError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::BadRequest(format!("Field '{}' is not a number", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BrewForm {
        BrewForm {
            brew_method: "Espresso".to_string(),
            coffee: "Test Coffee".to_string(),
            coffee_amount: "18.0".to_string(),
            grind_setting: "10.0".to_string(),
            water_amount: "36.0".to_string(),
            temperature: "93.0".to_string(),
            brew_time: "30.0".to_string(),
            notes: "Syrupy".to_string(),
            tags: vec!["morning".to_string()],
            rating: 4,
        }
    }

    #[test]
    fn test_into_brew_converts_numeric_fields() {
        let brew = valid_form()
            .into_brew("user-1", "2026-01-01T08:00:00Z".to_string())
            .unwrap();

        assert_eq!(brew.coffee_amount, 18.0);
        assert_eq!(brew.grind_setting, 10.0);
        assert_eq!(brew.water_amount, 36.0);
        assert_eq!(brew.temperature, 93.0);
        assert_eq!(brew.brew_time, 30.0);
        assert_eq!(brew.uid, "user-1");
        assert_eq!(brew.date, "2026-01-01T08:00:00Z");
        assert!(brew.id.is_none());
    }

    #[test]
    fn test_into_brew_rejects_non_numeric() {
        let mut form = valid_form();
        form.brew_time = "abc".to_string();

        let err = form
            .into_brew("user-1", "2026-01-01T08:00:00Z".to_string())
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_stored_brew_serialization_skips_id() {
        let mut brew = valid_form()
            .into_brew("user-1", "2026-01-01T08:00:00Z".to_string())
            .unwrap();
        brew.id = Some("doc-1".to_string());

        let json = serde_json::to_value(&brew).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["uid"], "user-1");
        assert_eq!(json["coffee_amount"], 18.0);
    }
}
