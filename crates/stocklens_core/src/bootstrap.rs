//! One-time startup seeding of the stock store.
//!
//! # Responsibility
//! - Insert a small sample data set when the store is empty at startup.
//!
//! # Invariants
//! - A store holding any stock is never modified.
//! - Sample rows are inserted atomically: all or none.

use crate::model::stock::Stock;
use crate::repo::stock_repo::{RepoResult, SqliteStockRepository, StockRepository};
use log::info;
use rusqlite::Connection;

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty; this many sample stocks were inserted.
    Seeded(usize),
    /// The store already held stocks; nothing was written.
    Skipped { existing: u64 },
}

/// Sample records written into an empty store.
pub fn sample_stocks() -> Vec<Stock> {
    vec![
        Stock::new("AAPL", "Apple Inc.")
            .with_exchange("NASDAQ")
            .with_sector("Technology"),
        Stock::new("600519.SS", "贵州茅台")
            .with_exchange("SSE")
            .with_sector("Consumer Goods"),
    ]
}

/// Seeds sample stocks when the `stocks` table is empty.
///
/// # Side effects
/// - Opens one write transaction when seeding is needed.
/// - Emits `seed` logging events.
pub fn seed_if_empty(conn: &mut Connection) -> RepoResult<SeedOutcome> {
    info!("event=seed module=bootstrap status=start");

    let tx = conn.transaction()?;
    let repo = SqliteStockRepository::new(&tx);

    let existing = repo.count()?;
    if existing > 0 {
        info!("event=seed module=bootstrap status=skipped existing={existing}");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let samples = sample_stocks();
    for stock in &samples {
        repo.insert_stock(stock)?;
        info!(
            "event=seed module=bootstrap status=inserted symbol={} name={} exchange={}",
            stock.symbol,
            stock.name,
            stock.exchange.as_deref().unwrap_or("-")
        );
    }
    tx.commit()?;

    info!("event=seed module=bootstrap status=ok inserted={}", samples.len());
    Ok(SeedOutcome::Seeded(samples.len()))
}
