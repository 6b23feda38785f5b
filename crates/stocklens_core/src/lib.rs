//! Core domain logic for stocklens.
//! This crate owns the stock store, its queries and the lookup service.

pub mod bootstrap;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use bootstrap::{sample_stocks, seed_if_empty, SeedOutcome};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::daily_quote::DailyQuote;
pub use model::stock::{Stock, StockDetail, StockSummary};
pub use model::ModelValidationError;
pub use repo::daily_quote_repo::{DailyQuoteRepository, SqliteDailyQuoteRepository};
pub use repo::stock_repo::{RepoError, RepoResult, SqliteStockRepository, StockRepository};
pub use service::stock_service::{ServiceError, ServiceResult, StockService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
