//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define narrow, use-case oriented data access contracts.
//! - Keep SQL details out of the lookup service.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.

pub mod daily_quote_repo;
pub mod stock_repo;
