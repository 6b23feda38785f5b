//! Daily quote repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and query end-of-day bars per symbol.
//!
//! # Invariants
//! - `(symbol, date)` uniqueness is enforced by the schema; duplicates
//!   surface as `RepoError::Db`.
//! - Inserting a quote for an unknown symbol fails the foreign key check.
//! - Symbol filters match exactly; callers pass the stored spelling.

use super::stock_repo::{RepoError, RepoResult};
use crate::model::daily_quote::DailyQuote;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};

const QUOTE_SELECT_SQL: &str = "SELECT
    id,
    symbol,
    date,
    open,
    high,
    low,
    close,
    volume,
    adj_close,
    created_at
FROM daily_quotes";

/// Repository interface for daily quote history.
pub trait DailyQuoteRepository {
    fn insert_quote(&self, quote: &DailyQuote) -> RepoResult<i64>;
    /// Newest first; `limit = None` returns the full history.
    fn list_by_symbol(&self, symbol: &str, limit: Option<u32>) -> RepoResult<Vec<DailyQuote>>;
    /// Oldest first, both bounds inclusive.
    fn list_by_symbol_between(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<DailyQuote>>;
    fn find_by_symbol_and_date(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> RepoResult<Option<DailyQuote>>;
    fn latest_date_by_symbol(&self, symbol: &str) -> RepoResult<Option<NaiveDate>>;
    fn latest_by_symbol(&self, symbol: &str) -> RepoResult<Option<DailyQuote>>;
    /// Returns the number of deleted rows.
    fn delete_by_symbol(&self, symbol: &str) -> RepoResult<usize>;
    fn exists_by_symbol_and_date(&self, symbol: &str, date: NaiveDate) -> RepoResult<bool>;
}

/// SQLite-backed daily quote repository.
pub struct SqliteDailyQuoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDailyQuoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_quotes(&self, sql: &str, args: impl Params) -> RepoResult<Vec<DailyQuote>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(args)?;
        let mut quotes = Vec::new();

        while let Some(row) = rows.next()? {
            quotes.push(parse_quote_row(row)?);
        }

        Ok(quotes)
    }
}

impl DailyQuoteRepository for SqliteDailyQuoteRepository<'_> {
    fn insert_quote(&self, quote: &DailyQuote) -> RepoResult<i64> {
        quote.validate()?;

        self.conn.execute(
            "INSERT INTO daily_quotes (
                symbol,
                date,
                open,
                high,
                low,
                close,
                volume,
                adj_close,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                quote.symbol.as_str(),
                quote.date,
                quote.open,
                quote.high,
                quote.low,
                quote.close,
                quote.volume,
                quote.adj_close,
                quote.created_at,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_by_symbol(&self, symbol: &str, limit: Option<u32>) -> RepoResult<Vec<DailyQuote>> {
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, i64::from);
        self.query_quotes(
            &format!("{QUOTE_SELECT_SQL} WHERE symbol = ?1 ORDER BY date DESC LIMIT ?2;"),
            params![symbol, limit],
        )
    }

    fn list_by_symbol_between(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<DailyQuote>> {
        self.query_quotes(
            &format!(
                "{QUOTE_SELECT_SQL}
                 WHERE symbol = ?1 AND date BETWEEN ?2 AND ?3
                 ORDER BY date ASC;"
            ),
            params![symbol, start, end],
        )
    }

    fn find_by_symbol_and_date(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> RepoResult<Option<DailyQuote>> {
        let quotes = self.query_quotes(
            &format!("{QUOTE_SELECT_SQL} WHERE symbol = ?1 AND date = ?2;"),
            params![symbol, date],
        )?;
        Ok(quotes.into_iter().next())
    }

    fn latest_date_by_symbol(&self, symbol: &str) -> RepoResult<Option<NaiveDate>> {
        let latest = self.conn.query_row(
            "SELECT MAX(date) FROM daily_quotes WHERE symbol = ?1;",
            [symbol],
            |row| row.get::<_, Option<NaiveDate>>(0),
        )?;
        Ok(latest)
    }

    fn latest_by_symbol(&self, symbol: &str) -> RepoResult<Option<DailyQuote>> {
        let mut quotes = self.list_by_symbol(symbol, Some(1))?;
        Ok(quotes.pop())
    }

    fn delete_by_symbol(&self, symbol: &str) -> RepoResult<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM daily_quotes WHERE symbol = ?1;", [symbol])?;
        Ok(deleted)
    }

    fn exists_by_symbol_and_date(&self, symbol: &str, date: NaiveDate) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM daily_quotes WHERE symbol = ?1 AND date = ?2);",
            params![symbol, date],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_quote_row(row: &Row<'_>) -> RepoResult<DailyQuote> {
    let quote = DailyQuote {
        id: Some(row.get("id")?),
        symbol: row.get("symbol")?,
        date: row.get("date")?,
        open: row.get("open")?,
        high: row.get("high")?,
        low: row.get("low")?,
        close: row.get("close")?,
        volume: row.get("volume")?,
        adj_close: row.get("adj_close")?,
        created_at: row.get("created_at")?,
    };
    quote.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "quote {} {} in daily_quotes: {err}",
            quote.symbol, quote.date
        ))
    })?;
    Ok(quote)
}
