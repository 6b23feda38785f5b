//! Shared request state.
//!
//! # Invariants
//! - One SQLite connection serves all requests, one store call at a time.
//! - Store calls never run on the async executor threads.
//! - A panic inside one lookup does not lock out later lookups.

use crate::error::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};
use stocklens_core::{ServiceResult, SqliteStockRepository, StockService};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one lookup against a service bound to the shared connection.
    pub async fn with_service<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&StockService<SqliteStockRepository<'_>>) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            // Lookups only read, so a poisoned guard holds a consistent connection.
            let guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            let service = StockService::new(SqliteStockRepository::new(&guard));
            f(&service).map_err(ApiError::from)
        })
        .await;

        joined.map_err(|err| ApiError::Internal(format!("lookup task aborted: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::error::ApiError;
    use stocklens_core::db::open_db_in_memory;

    #[tokio::test]
    async fn panicked_lookup_does_not_block_later_lookups() {
        let state = AppState::new(open_db_in_memory().unwrap());

        let failed = state
            .with_service::<bool, _>(|_| panic!("lookup blew up"))
            .await;
        assert!(matches!(failed, Err(ApiError::Internal(_))));

        let exists = state
            .with_service(|service| service.exists("AAPL"))
            .await
            .unwrap();
        assert!(!exists);
    }
}
