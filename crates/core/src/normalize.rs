//! Input normalization shared by project, slot, milestone, profile and
//! specialty mutations.
//!
//! Blank optional text is always stored as `NULL`, never as an empty string:
//! readers distinguish "unset" from "empty".

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::Date;

/// Maximum length of a project title or slot role name.
pub const MAX_TITLE_LENGTH: usize = 300;

/// Date format accepted for project and milestone dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A free-text list as submitted by a form or API client.
///
/// Accepts either a comma-separated string (`"abstract, poster"`) or a JSON
/// array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Text(String),
    Items(Vec<String>),
}

impl ListInput {
    /// Trim every entry and drop empty ones, keeping submission order.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Self::Text(text) => parse_list(text),
            Self::Items(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Split a comma-separated string into trimmed, non-empty entries.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim optional text, mapping blank values to `None`.
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Validate that a required text field is non-blank, returning it trimmed.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Parse an optional `YYYY-MM-DD` date. Blank input yields `None`.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>, CoreError> {
    match blank_to_none(value) {
        None => Ok(None),
        Some(text) => Date::parse_from_str(&text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                CoreError::Validation(format!(
                    "{field} '{text}' is not a valid date (expected YYYY-MM-DD)"
                ))
            }),
    }
}

/// Validate a completion/progress percentage in `0..=100`.
pub fn validate_percent(field: &str, value: i32) -> Result<i32, CoreError> {
    if (0..=100).contains(&value) {
        Ok(value)
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between 0 and 100, got {value}"
        )))
    }
}

/// Normalize an email address: trimmed, lower-cased, one `@` with text on
/// both sides.
pub fn normalize_email(value: &str) -> Result<String, CoreError> {
    let email = value.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(CoreError::Validation(format!(
            "'{}' is not a valid email address",
            value.trim()
        ))),
    }
}

/// Validate a specialty slug: lowercase ASCII letters, digits and inner
/// hyphens only.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    let valid_chars = slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if slug.is_empty() || !valid_chars || slug.starts_with('-') || slug.ends_with('-') {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and inner hyphens"
        )));
    }
    Ok(())
}

/// Validate that a resource URL is an absolute http(s) link.
pub fn validate_url(url: &str) -> Result<String, CoreError> {
    let trimmed = url.trim();
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if has_host {
        Ok(trimmed.to_string())
    } else {
        Err(CoreError::Validation(format!(
            "Resource URL '{trimmed}' must start with http:// or https://"
        )))
    }
}
