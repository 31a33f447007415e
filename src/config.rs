use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Appointments";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the listen address.
pub const ADDR_ENV: &str = "APPOINTMENTS_ADDR";
/// Environment variable overriding the database file. `:memory:` keeps
/// everything in RAM for the life of the process.
pub const DB_ENV: &str = "APPOINTMENTS_DB";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const MEMORY_DATABASE: &str = ":memory:";

/// Get the application data directory (~/Appointments/)
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default SQLite database file
pub fn database_path() -> PathBuf {
    app_data_dir().join("appointments.db")
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "appointments=info,appointments_lib=info,tower_http=warn"
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid listen address in {var}: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub database: DatabaseLocation,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup` (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_ENV,
                value: raw_addr.clone(),
            })?;

        let database = match lookup(DB_ENV) {
            Some(value) if value == MEMORY_DATABASE => DatabaseLocation::Memory,
            Some(value) if !value.trim().is_empty() => DatabaseLocation::File(PathBuf::from(value)),
            _ => DatabaseLocation::File(database_path()),
        };

        Ok(Self { addr, database })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("appointments.db"));
    }

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse().unwrap());
        assert_eq!(config.database, DatabaseLocation::File(database_path()));
    }

    #[test]
    fn environment_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ADDR_ENV, "0.0.0.0:9000"),
            (DB_ENV, "/tmp/clinic.db"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(
            config.database,
            DatabaseLocation::File(PathBuf::from("/tmp/clinic.db"))
        );
    }

    #[test]
    fn memory_database_marker() {
        let config = ServerConfig::from_lookup(lookup(&[(DB_ENV, ":memory:")])).unwrap();
        assert_eq!(config.database, DatabaseLocation::Memory);
    }

    #[test]
    fn bad_address_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(ADDR_ENV, "localhost")])).unwrap_err();
        assert!(err.to_string().contains("localhost"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
