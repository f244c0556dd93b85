//! Shared pieces of the warehouse, product and courier catalogs.

use crate::error::ErrorCode;
use crate::services::inventory::InventoryError;

// =============================================================================
// ERRORS
// =============================================================================

/// A rejected field, with a message suitable for showing next to the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid {0}")]
    Invalid(#[from] ValidationError),
    /// A stock side effect of the change was rejected.
    #[error(transparent)]
    Stock(#[from] InventoryError),
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::Invalid(_) => "E_VALIDATION",
            Self::Stock(err) => err.error_code(),
        }
    }
}

// =============================================================================
// VALIDATION HELPERS
// =============================================================================

/// Trimmed value with at least `min` characters.
pub(crate) fn min_len(field: &'static str, value: &str, min: usize, message: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(ValidationError::new(field, message));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_nan() || value < 0.0 {
        return Err(ValidationError::new(field, "must be zero or greater"));
    }
    Ok(value)
}

pub(crate) fn http_url(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') && !trimmed.contains(char::is_whitespace) => {
            Ok(trimmed.to_string())
        }
        _ => Err(ValidationError::new(field, "Please enter a valid image URL")),
    }
}

// =============================================================================
// IDS
// =============================================================================

/// Allocate the next display id for a prefix, e.g. `W00042`.
pub(crate) fn next_id(counter: &mut u64, prefix: &str) -> String {
    *counter += 1;
    format!("{prefix}{:05}", *counter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_len_trims_before_counting() {
        assert_eq!(min_len("name", "  ab ", 2, "too short").unwrap(), "ab");
        let err = min_len("name", "  a  ", 2, "too short").unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "too short");
    }

    #[test]
    fn non_negative_rejects_negative_and_nan() {
        assert!(non_negative("price", 0.0).is_ok());
        assert!(non_negative("price", -0.5).is_err());
        assert!(non_negative("price", f64::NAN).is_err());
    }

    #[test]
    fn http_url_requires_scheme_and_host() {
        assert!(http_url("image", "https://images.example.com/a.png").is_ok());
        assert!(http_url("image", "http://x").is_ok());
        assert!(http_url("image", "ftp://x").is_err());
        assert!(http_url("image", "https://").is_err());
        assert!(http_url("image", "https:///path").is_err());
        assert!(http_url("image", "https://a b").is_err());
    }

    #[test]
    fn next_id_zero_pads() {
        let mut counter = 0;
        assert_eq!(next_id(&mut counter, "W"), "W00001");
        assert_eq!(next_id(&mut counter, "W"), "W00002");
        counter = 99_999;
        assert_eq!(next_id(&mut counter, "ORD"), "ORD100000");
    }
}
