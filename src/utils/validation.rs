//! Input validation utilities
//!
//! Custom validators plugged into `#[validate(custom(...))]` on request bodies.

use std::borrow::Cow;

use validator::ValidationError;

use crate::constants::{MAX_COHORT, MIN_COHORT};

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Validate an eligibility list: non-empty, every cohort in range
pub fn validate_cohorts(cohorts: &[i32]) -> Result<(), ValidationError> {
    if cohorts.is_empty() {
        return Err(error("cohorts_empty", "At least one cohort must be eligible"));
    }
    if cohorts
        .iter()
        .any(|year| !(MIN_COHORT..=MAX_COHORT).contains(year))
    {
        return Err(error("cohort_range", "Cohorts must be between 1 and 3"));
    }
    Ok(())
}

/// Validate a list of chosen option indices
pub fn validate_choices(choices: &[i32]) -> Result<(), ValidationError> {
    if choices.iter().any(|choice| *choice < 0) {
        return Err(error("choice_negative", "Choices must be non-negative"));
    }
    Ok(())
}

/// Validate a language identifier (lowercase ascii, digits, `+`, `#`)
pub fn validate_language(language: &str) -> Result<(), ValidationError> {
    if language.is_empty()
        || !language
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '#' | '_'))
    {
        return Err(error("language", "Unsupported language identifier"));
    }
    Ok(())
}
