//! End-of-day price record associated with a stock.
//!
//! # Invariants
//! - `(symbol, date)` is unique.
//! - `high >= low` and `volume >= 0`.

use super::{require_text, stock::SYMBOL_MAX_CHARS, ModelValidationError};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily OHLC bar for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuote {
    /// Surrogate key; `None` until persisted.
    pub id: Option<i64>,
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// Split/dividend adjusted close, when the source provides one.
    pub adj_close: Option<f64>,
    pub created_at: NaiveDateTime,
}

impl DailyQuote {
    /// Creates an unsaved quote stamped with the current UTC time.
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            id: None,
            symbol: symbol.into(),
            date,
            open,
            high,
            low,
            close,
            volume,
            adj_close: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("symbol", &self.symbol, SYMBOL_MAX_CHARS)?;
        if self.high < self.low {
            return Err(ModelValidationError::InvertedPriceRange);
        }
        if self.volume < 0 {
            return Err(ModelValidationError::NegativeVolume(self.volume));
        }
        Ok(())
    }
}
