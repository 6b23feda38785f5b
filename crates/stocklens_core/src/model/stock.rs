//! Stock reference record and its API projections.
//!
//! # Invariants
//! - `symbol` is never blank and is unique regardless of case.
//! - `created_at` is set once and never rewritten.

use super::{limit_text, require_text, ModelValidationError};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SYMBOL_MAX_CHARS: usize = 20;
pub const NAME_MAX_CHARS: usize = 200;
pub const EXCHANGE_MAX_CHARS: usize = 50;
pub const SECTOR_MAX_CHARS: usize = 100;

/// Persisted stock reference record, keyed by ticker symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// Ticker symbol, e.g. `AAPL` or `600519.SS`. Case is preserved.
    pub symbol: String,
    /// Display name, e.g. `Apple Inc.`.
    pub name: String,
    /// Market identifier, e.g. `NASDAQ`.
    pub exchange: Option<String>,
    /// Industry classification, e.g. `Technology`.
    pub sector: Option<String>,
    /// UTC time of the last mutation.
    pub last_update: Option<NaiveDateTime>,
    /// UTC creation time.
    pub created_at: NaiveDateTime,
}

impl Stock {
    /// Creates a stock stamped with the current UTC time.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: None,
            sector: None,
            last_update: Some(now),
            created_at: now,
        }
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Checks field-level invariants shared by writes and reads.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("symbol", &self.symbol, SYMBOL_MAX_CHARS)?;
        require_text("name", &self.name, NAME_MAX_CHARS)?;
        if let Some(exchange) = self.exchange.as_deref() {
            limit_text("exchange", exchange, EXCHANGE_MAX_CHARS)?;
        }
        if let Some(sector) = self.sector.as_deref() {
            limit_text("sector", sector, SECTOR_MAX_CHARS)?;
        }
        Ok(())
    }
}

/// Reduced projection used by search and sector listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
}

impl From<Stock> for StockSummary {
    fn from(stock: Stock) -> Self {
        Self {
            symbol: stock.symbol,
            name: stock.name,
            exchange: stock.exchange,
        }
    }
}

/// Full projection used by single-symbol lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub last_update: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<Stock> for StockDetail {
    fn from(stock: Stock) -> Self {
        Self {
            symbol: stock.symbol,
            name: stock.name,
            exchange: stock.exchange,
            sector: stock.sector,
            last_update: stock.last_update,
            created_at: stock.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Stock, StockDetail, StockSummary, SYMBOL_MAX_CHARS};
    use crate::model::ModelValidationError;

    #[test]
    fn new_stock_stamps_both_timestamps() {
        let stock = Stock::new("AAPL", "Apple Inc.");
        assert_eq!(stock.last_update, Some(stock.created_at));
        assert!(stock.exchange.is_none());
        assert!(stock.sector.is_none());
    }

    #[test]
    fn validate_rejects_blank_symbol_and_name() {
        let blank_symbol = Stock::new("  ", "Apple Inc.");
        assert_eq!(
            blank_symbol.validate(),
            Err(ModelValidationError::BlankField("symbol"))
        );

        let blank_name = Stock::new("AAPL", "");
        assert_eq!(
            blank_name.validate(),
            Err(ModelValidationError::BlankField("name"))
        );
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        let wide_name = "贵".repeat(150);
        assert!(Stock::new("600519.SS", wide_name).validate().is_ok());

        let long_symbol = "X".repeat(SYMBOL_MAX_CHARS + 1);
        assert!(matches!(
            Stock::new(long_symbol, "Too Long").validate(),
            Err(ModelValidationError::FieldTooLong { field: "symbol", .. })
        ));
    }

    #[test]
    fn projections_keep_the_expected_fields() {
        let stock = Stock::new("AAPL", "Apple Inc.")
            .with_exchange("NASDAQ")
            .with_sector("Technology");

        let summary = StockSummary::from(stock.clone());
        assert_eq!(summary.exchange.as_deref(), Some("NASDAQ"));

        let detail = StockDetail::from(stock.clone());
        assert_eq!(detail.sector.as_deref(), Some("Technology"));
        assert_eq!(detail.created_at, stock.created_at);
    }

    #[test]
    fn detail_serializes_camel_case_timestamps() {
        let detail = StockDetail::from(Stock::new("AAPL", "Apple Inc."));
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("lastUpdate").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("last_update").is_none());
    }
}
