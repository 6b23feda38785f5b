//! Stock reference data model.
//!
//! # Responsibility
//! - Define the persisted records (`Stock`, `DailyQuote`).
//! - Define the read projections handed to API callers.
//!
//! # Invariants
//! - A stock is identified by its symbol, compared case-insensitively.
//! - Persisted records are validated before every write and after every read.

pub mod daily_quote;
pub mod stock;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Invariant violation detected on a model record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required text field is empty or whitespace only.
    BlankField(&'static str),
    /// A text field exceeds its storage width.
    FieldTooLong { field: &'static str, max_chars: usize },
    /// Daily quote `high` is below `low`.
    InvertedPriceRange,
    /// Daily quote volume is negative.
    NegativeVolume(i64),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::FieldTooLong { field, max_chars } => {
                write!(f, "{field} exceeds {max_chars} characters")
            }
            Self::InvertedPriceRange => write!(f, "high must not be lower than low"),
            Self::NegativeVolume(volume) => write!(f, "volume must not be negative, got {volume}"),
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField(field));
    }
    limit_text(field, value, max_chars)
}

pub(crate) fn limit_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ModelValidationError> {
    if value.chars().count() > max_chars {
        return Err(ModelValidationError::FieldTooLong { field, max_chars });
    }
    Ok(())
}
