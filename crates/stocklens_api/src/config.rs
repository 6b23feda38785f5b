//! Environment-driven server configuration.
//!
//! # Invariants
//! - Values are trimmed; blank values count as unset.
//! - Invalid values fail startup instead of silently falling back.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use stocklens_core::db::{open_db, open_db_in_memory, DbResult};
use stocklens_core::default_log_level;

pub const ENV_BIND_ADDR: &str = "STOCKLENS_BIND_ADDR";
pub const ENV_DB_PATH: &str = "STOCKLENS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "STOCKLENS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "STOCKLENS_LOG_DIR";
pub const ENV_SEED: &str = "STOCKLENS_SEED";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DB_FILE_NAME: &str = "stocklens.sqlite3";
const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBindAddr(String),
    InvalidFlag { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBindAddr(value) => {
                write!(f, "{ENV_BIND_ADDR} must be a socket address, got `{value}`")
            }
            Self::InvalidFlag { key, value } => {
                write!(f, "{key} must be true|false, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Where the stock store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl DbLocation {
    /// Opens the store and applies pending migrations.
    pub fn open(&self) -> DbResult<Connection> {
        match self {
            Self::File(path) => open_db(path),
            Self::Memory => open_db_in_memory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db: DbLocation,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` logs to stderr.
    pub log_dir: Option<String>,
    /// Seed sample stocks into an empty store at startup.
    pub seed_on_start: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr_raw = read(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr_raw.clone()))?;

        let db = match read(ENV_DB_PATH) {
            Some(path) if path == IN_MEMORY_DB => DbLocation::Memory,
            Some(path) => DbLocation::File(PathBuf::from(path)),
            None => DbLocation::File(std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
        };

        let seed_on_start = match read(ENV_SEED) {
            None => true,
            Some(value) => parse_flag(ENV_SEED, &value)?,
        };

        Ok(Self {
            bind_addr,
            db,
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR),
            seed_on_start,
        })
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}
