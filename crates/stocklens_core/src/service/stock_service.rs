//! Stock lookup use-case service.
//!
//! # Responsibility
//! - Validate and normalize caller input for search and detail lookups.
//! - Map persisted stocks into summary/detail projections.
//! - Raise semantic errors (`InvalidArgument`, `NotFound`) the API layer
//!   translates into response codes.
//!
//! # Invariants
//! - Blank keywords never reach the repository and never fail.
//! - Detail lookups trim the symbol; `exists` and sector listing pass input
//!   through untouched.

use crate::model::stock::{StockDetail, StockSummary};
use crate::repo::stock_repo::{RepoError, StockRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for stock lookups.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input is blank or malformed.
    InvalidArgument(String),
    /// No stock matches the requested symbol (as the caller sent it).
    NotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "{message}"),
            Self::NotFound(symbol) => write!(f, "stock not found: {symbol}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Lookup service facade over a stock repository.
pub struct StockService<R: StockRepository> {
    repo: R,
}

impl<R: StockRepository> StockService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Searches symbol and name for a case-insensitive keyword match.
    ///
    /// # Contract
    /// - `None` or blank keyword returns an empty list.
    /// - No match is an empty list, not an error.
    pub fn search(&self, keyword: Option<&str>) -> ServiceResult<Vec<StockSummary>> {
        let Some(keyword) = keyword.map(str::trim).filter(|value| !value.is_empty()) else {
            warn!("event=stock_search module=service status=skipped reason=blank_keyword");
            return Ok(Vec::new());
        };

        let stocks = self.repo.search_by_symbol_or_name(keyword)?;
        info!(
            "event=stock_search module=service status=ok keyword={keyword} hits={}",
            stocks.len()
        );
        Ok(stocks.into_iter().map(StockSummary::from).collect())
    }

    /// Looks up one stock by symbol, ignoring case.
    ///
    /// # Errors
    /// - `InvalidArgument` when `symbol` is `None` or blank.
    /// - `NotFound` carrying the symbol as given when nothing matches.
    pub fn get_stock_details(&self, symbol: Option<&str>) -> ServiceResult<StockDetail> {
        let requested = symbol.unwrap_or_default();
        let trimmed = requested.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "stock symbol must not be blank".to_string(),
            ));
        }

        match self.repo.find_by_symbol_ignore_case(trimmed)? {
            Some(stock) => {
                info!(
                    "event=stock_detail module=service status=ok symbol={}",
                    stock.symbol
                );
                Ok(StockDetail::from(stock))
            }
            None => {
                warn!("event=stock_detail module=service status=not_found symbol={requested}");
                Err(ServiceError::NotFound(requested.to_string()))
            }
        }
    }

    /// Returns whether a stock with this symbol exists, ignoring case.
    pub fn exists(&self, symbol: &str) -> ServiceResult<bool> {
        Ok(self.repo.exists_by_symbol_ignore_case(symbol)?)
    }

    /// Lists stocks whose sector equals `sector` exactly.
    pub fn find_by_sector(&self, sector: &str) -> ServiceResult<Vec<StockSummary>> {
        let stocks = self.repo.find_by_sector(sector)?;
        info!(
            "event=stock_sector module=service status=ok sector={sector} hits={}",
            stocks.len()
        );
        Ok(stocks.into_iter().map(StockSummary::from).collect())
    }
}
