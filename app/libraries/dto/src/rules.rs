//! Field rules shared by the create and partial-update shapes.

use crate::patch::Patch;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::{
    borrow::{Borrow, Cow},
    sync::LazyLock,
};
use validator::{ValidateEmail, ValidationError, ValidationErrors};

pub static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("phone number pattern"));

pub const NAME_MAX: usize = 100;
pub const ADDRESS_MAX: usize = 200;

pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_owned())
}

pub fn trimmed_patch<'de, D>(deserializer: D) -> Result<Patch<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Patch::<String>::deserialize(deserializer).map(|patch| patch.map(|v| v.trim().to_owned()))
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn name(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if (1..=NAME_MAX).contains(&len) {
        Ok(())
    } else {
        Err(error("length", "name must be 1 to 100 characters"))
    }
}

pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    if PHONE_NUMBER.is_match(value) {
        Ok(())
    } else {
        Err(error("regex", "phone_number must be 10 to 15 digits"))
    }
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(error("email", "email must be a valid address"))
    }
}

pub fn address(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() <= ADDRESS_MAX {
        Ok(())
    } else {
        Err(error("length", "address must be at most 200 characters"))
    }
}

pub fn amount(value: &f64) -> Result<(), ValidationError> {
    if value.is_finite() && *value > 0.0 {
        Ok(())
    } else {
        Err(error("range", "amount must be greater than 0"))
    }
}

/// Runs `rule` on a supplied value and rejects an explicit `null`.
pub fn check_patch<T: ?Sized, U>(
    errors: &mut ValidationErrors,
    field: &'static str,
    patch: &Patch<U>,
    rule: impl FnOnce(&T) -> Result<(), ValidationError>,
) where
    U: Borrow<T>,
{
    match patch {
        Patch::Missing => {}
        Patch::Null => errors.add(field, error("null", "field cannot be null")),
        Patch::Value(value) => {
            if let Err(e) = rule(value.borrow()) {
                errors.add(field, e);
            }
        }
    }
}

/// Rejects an explicit `null` on a field that has no further rule.
pub fn check_not_null<U>(errors: &mut ValidationErrors, field: &'static str, patch: &Patch<U>) {
    if matches!(patch, Patch::Null) {
        errors.add(field, error("null", "field cannot be null"));
    }
}
