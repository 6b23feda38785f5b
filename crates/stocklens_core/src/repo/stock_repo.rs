//! Stock repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the read queries behind symbol lookup, keyword search and
//!   sector listing.
//! - Provide the minimal write path used by startup seeding.
//!
//! # Invariants
//! - Symbol and keyword comparisons are case-insensitive for any Unicode
//!   letter (`fold_case`, registered by `db::open_db*`).
//! - Sector comparisons are exact and case-sensitive.
//! - Multi-row reads come back in insertion order.

use crate::db::DbError;
use crate::model::stock::Stock;
use crate::model::ModelValidationError;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STOCK_SELECT_SQL: &str = "SELECT
    symbol,
    name,
    exchange,
    sector,
    last_update,
    created_at
FROM stocks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by stock and daily quote persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read-mostly contract over persisted stock records.
pub trait StockRepository {
    fn find_by_symbol_ignore_case(&self, symbol: &str) -> RepoResult<Option<Stock>>;
    /// Matches `keyword` as a case-insensitive substring of symbol or name.
    fn search_by_symbol_or_name(&self, keyword: &str) -> RepoResult<Vec<Stock>>;
    fn find_by_sector(&self, sector: &str) -> RepoResult<Vec<Stock>>;
    fn exists_by_symbol_ignore_case(&self, symbol: &str) -> RepoResult<bool>;
    fn count(&self) -> RepoResult<u64>;
    fn insert_stock(&self, stock: &Stock) -> RepoResult<()>;
}

/// SQLite-backed stock repository.
pub struct SqliteStockRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStockRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_stocks(&self, sql: &str, arg: &str) -> RepoResult<Vec<Stock>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([arg])?;
        let mut stocks = Vec::new();

        while let Some(row) = rows.next()? {
            stocks.push(parse_stock_row(row)?);
        }

        Ok(stocks)
    }
}

impl StockRepository for SqliteStockRepository<'_> {
    fn find_by_symbol_ignore_case(&self, symbol: &str) -> RepoResult<Option<Stock>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{STOCK_SELECT_SQL} WHERE fold_case(symbol) = fold_case(?1);"
            ))?;

        let mut rows = stmt.query([symbol])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_stock_row(row)?));
        }

        Ok(None)
    }

    fn search_by_symbol_or_name(&self, keyword: &str) -> RepoResult<Vec<Stock>> {
        // instr() keeps `%` and `_` literal, unlike LIKE.
        self.query_stocks(
            &format!(
                "{STOCK_SELECT_SQL}
                 WHERE instr(fold_case(symbol), fold_case(?1)) > 0
                    OR instr(fold_case(name), fold_case(?1)) > 0
                 ORDER BY rowid ASC;"
            ),
            keyword,
        )
    }

    fn find_by_sector(&self, sector: &str) -> RepoResult<Vec<Stock>> {
        self.query_stocks(
            &format!("{STOCK_SELECT_SQL} WHERE sector = ?1 ORDER BY rowid ASC;"),
            sector,
        )
    }

    fn exists_by_symbol_ignore_case(&self, symbol: &str) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM stocks WHERE fold_case(symbol) = fold_case(?1));",
            [symbol],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(exists == 1)
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM stocks;", [], |row| row.get::<_, i64>(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative stock count `{count}`")))
    }

    fn insert_stock(&self, stock: &Stock) -> RepoResult<()> {
        stock.validate()?;

        self.conn.execute(
            "INSERT INTO stocks (
                symbol,
                name,
                exchange,
                sector,
                last_update,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                stock.symbol.as_str(),
                stock.name.as_str(),
                stock.exchange.as_deref(),
                stock.sector.as_deref(),
                stock.last_update,
                stock.created_at,
            ],
        )?;

        Ok(())
    }
}

fn parse_stock_row(row: &Row<'_>) -> RepoResult<Stock> {
    let stock = Stock {
        symbol: row.get("symbol")?,
        name: row.get("name")?,
        exchange: row.get("exchange")?,
        sector: row.get("sector")?,
        last_update: row.get("last_update")?,
        created_at: row.get("created_at")?,
    };
    stock.validate().map_err(|err| {
        RepoError::InvalidData(format!("stock `{}` in stocks: {err}", stock.symbol))
    })?;
    Ok(stock)
}
