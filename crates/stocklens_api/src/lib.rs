//! HTTP surface for stocklens.
//!
//! # Responsibility
//! - Expose the stock lookup service as four read-only JSON endpoints.
//! - Wrap every response in the `{code, msg, data?}` envelope.

pub mod config;
pub mod envelope;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, DbLocation, ServerConfig};
pub use envelope::{ApiResult, ResultCode};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
