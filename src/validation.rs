// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Brew form validation schema.
//!
//! Field-level checks on the string-typed [`BrewForm`]: required-ness,
//! coffee name length, and closed numeric ranges. All field errors are
//! collected in one pass; an empty map signals validity. Messages are fixed
//! strings surfaced inline on the form.

use crate::models::BrewForm;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// Field name to human-readable message, one entry per invalid field.
pub type FieldErrors = BTreeMap<String, String>;

/// Validate a brew entry form before conversion to numeric storage form.
///
/// Returns an empty map when the form is valid. All invalid fields are
/// reported at once, first message per field.
pub fn validate_brew_form(form: &BrewForm) -> FieldErrors {
    let mut field_errors = FieldErrors::new();

    if let Err(errors) = form.validate() {
        for (field, errs) in errors.field_errors() {
            if let Some(message) = errs.iter().find_map(|e| e.message.as_ref()) {
                field_errors
                    .entry(field.to_string())
                    .or_insert_with(|| message.to_string());
            }
        }
    }

    field_errors
}

pub(crate) fn validate_brew_method(value: &str) -> Result<(), ValidationError> {
    require_non_empty(value, "Brew method is required")
}

pub(crate) fn validate_coffee_name(value: &str) -> Result<(), ValidationError> {
    require_non_empty(value, "Coffee name is required")
}

pub(crate) fn validate_coffee_amount(value: &str) -> Result<(), ValidationError> {
    numeric_in_range(
        value,
        0.1,
        100.0,
        "Coffee amount is required",
        "Enter valid amount (0.1-100g)",
    )
}

pub(crate) fn validate_grind_setting(value: &str) -> Result<(), ValidationError> {
    numeric_in_range(
        value,
        0.0,
        100.0,
        "Grind setting is required",
        "Enter valid setting (0-100)",
    )
}

pub(crate) fn validate_water_amount(value: &str) -> Result<(), ValidationError> {
    numeric_in_range(
        value,
        1.0,
        1000.0,
        "Water amount is required",
        "Enter valid amount (1-1000g)",
    )
}

pub(crate) fn validate_temperature(value: &str) -> Result<(), ValidationError> {
    numeric_in_range(
        value,
        0.0,
        100.0,
        "Temperature is required",
        "Enter valid temp (0-100C)",
    )
}

pub(crate) fn validate_brew_time(value: &str) -> Result<(), ValidationError> {
    numeric_in_range(
        value,
        1.0,
        3600.0,
        "Brew time is required",
        "Enter valid time (1-3600s)",
    )
}

fn require_non_empty(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

/// Accept only values that parse to a finite number within the closed range.
fn numeric_in_range(
    value: &str,
    min: f64,
    max: f64,
    required_message: &'static str,
    range_message: &'static str,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(required_message)));
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= min && n <= max => Ok(()),
        _ => Err(ValidationError::new("range").with_message(Cow::Borrowed(range_message))),
    }
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
            notes: String::new(),
            tags: Vec::new(),
            rating: 3,
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let errors = validate_brew_form(&valid_form());
        assert!(errors.is_empty(), "expected no errors, got {:?}", errors);
    }

    #[test]
    fn test_required_fields() {
        let errors = validate_brew_form(&BrewForm::default());

        assert_eq!(errors["brew_method"], "Brew method is required");
        assert_eq!(errors["coffee"], "Coffee name is required");
        assert_eq!(errors["coffee_amount"], "Coffee amount is required");
        assert_eq!(errors["grind_setting"], "Grind setting is required");
        assert_eq!(errors["water_amount"], "Water amount is required");
        assert_eq!(errors["temperature"], "Temperature is required");
        assert_eq!(errors["brew_time"], "Brew time is required");
    }

    #[test]
    fn test_all_errors_collected_in_one_pass() {
        // Every required field missing: one message per field, same pass.
        let errors = validate_brew_form(&BrewForm::default());
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_coffee_amount_boundaries() {
        for (value, ok) in [("0.1", true), ("100", true), ("0.05", false), ("101", false)] {
            let mut form = valid_form();
            form.coffee_amount = value.to_string();
            let errors = validate_brew_form(&form);
            if ok {
                assert!(errors.is_empty(), "{} should be valid", value);
            } else {
                assert_eq!(errors["coffee_amount"], "Enter valid amount (0.1-100g)");
            }
        }
    }

    #[test]
    fn test_grind_setting_boundaries() {
        for (value, ok) in [("0", true), ("100", true), ("-1", false), ("100.5", false)] {
            let mut form = valid_form();
            form.grind_setting = value.to_string();
            let errors = validate_brew_form(&form);
            if ok {
                assert!(errors.is_empty(), "{} should be valid", value);
            } else {
                assert_eq!(errors["grind_setting"], "Enter valid setting (0-100)");
            }
        }
    }

    #[test]
    fn test_water_amount_boundaries() {
        for (value, ok) in [("1", true), ("1000", true), ("0.5", false), ("1001", false)] {
            let mut form = valid_form();
            form.water_amount = value.to_string();
            let errors = validate_brew_form(&form);
            if ok {
                assert!(errors.is_empty(), "{} should be valid", value);
            } else {
                assert_eq!(errors["water_amount"], "Enter valid amount (1-1000g)");
            }
        }
    }

    #[test]
    fn test_temperature_boundaries() {
        for (value, ok) in [("0", true), ("100", true), ("-0.5", false), ("100.1", false)] {
            let mut form = valid_form();
            form.temperature = value.to_string();
            let errors = validate_brew_form(&form);
            if ok {
                assert!(errors.is_empty(), "{} should be valid", value);
            } else {
                assert_eq!(errors["temperature"], "Enter valid temp (0-100C)");
            }
        }
    }

    #[test]
    fn test_brew_time_boundaries() {
        for (value, ok) in [("1", true), ("3600", true), ("0", false), ("3601", false)] {
            let mut form = valid_form();
            form.brew_time = value.to_string();
            let errors = validate_brew_form(&form);
            if ok {
                assert!(errors.is_empty(), "{} should be valid", value);
            } else {
                assert_eq!(errors["brew_time"], "Enter valid time (1-3600s)");
            }
        }
    }

    #[test]
    fn test_non_numeric_values_rejected() {
        let mut form = valid_form();
        form.coffee_amount = "eighteen".to_string();
        form.brew_time = "NaN".to_string();

        let errors = validate_brew_form(&form);
        assert_eq!(errors["coffee_amount"], "Enter valid amount (0.1-100g)");
        assert_eq!(errors["brew_time"], "Enter valid time (1-3600s)");
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut form = valid_form();
        form.temperature = "inf".to_string();

        let errors = validate_brew_form(&form);
        assert_eq!(errors["temperature"], "Enter valid temp (0-100C)");
    }

    #[test]
    fn test_coffee_name_length() {
        let mut form = valid_form();
        form.coffee = "a".repeat(100);
        assert!(validate_brew_form(&form).is_empty());

        form.coffee = "a".repeat(101);
        let errors = validate_brew_form(&form);
        assert_eq!(errors["coffee"], "Coffee name must be 100 characters or less");
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut form = valid_form();
        form.rating = 6;

        let errors = validate_brew_form(&form);
        assert_eq!(errors["rating"], "Rating must be between 0 and 5");
    }
}
