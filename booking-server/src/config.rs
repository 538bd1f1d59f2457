//! Server configuration.
//!
//! Values come from the environment (optionally via a `.env` file loaded by
//! the binary). Every setting except the database URL has a default.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default directory for the frontend's static files.
const DEFAULT_STATIC_DIR: &str = "static";

/// Default maximum pooled database connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default seconds to wait for a pooled connection.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable couldn't be parsed
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before failing
    pub acquire_timeout_secs: u64,
    /// Apply bundled migrations on startup
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Create a config for the given URL with default pool settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            run_migrations: false,
        }
    }

    /// Set maximum pooled connections.
    pub fn with_max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Set the pool acquire timeout.
    pub fn with_acquire_timeout(mut self, secs: u64) -> Self {
        self.acquire_timeout_secs = secs;
        self
    }

    /// Apply migrations on startup.
    pub fn with_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }
}

/// Where the server gets its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// PostgreSQL
    Postgres(DatabaseConfig),
    /// In-memory store seeded from a JSON file
    Mock(PathBuf),
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Create a config with default address and static directory.
    pub fn new(store: StoreConfig) -> Self {
        Self {
            bind_addr: parse_default_addr(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            store,
        }
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the static files directory.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Read configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `DATABASE_URL` | required unless `MOCK_DATA` is set |
    /// | `MOCK_DATA` | unset; path to a JSON seed file |
    /// | `BIND_ADDR` | `127.0.0.1:3000` |
    /// | `STATIC_DIR` | `static` |
    /// | `DB_MAX_CONNECTIONS` | 5 |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | 5 |
    /// | `RUN_MIGRATIONS` | false |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let store = match var("MOCK_DATA") {
            Some(path) => StoreConfig::Mock(PathBuf::from(path)),
            None => {
                let url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let mut db = DatabaseConfig::new(url);
                if let Some(v) = var("DB_MAX_CONNECTIONS") {
                    db = db.with_max_connections(parse("DB_MAX_CONNECTIONS", &v)?);
                }
                if let Some(v) = var("DB_ACQUIRE_TIMEOUT_SECS") {
                    db = db.with_acquire_timeout(parse("DB_ACQUIRE_TIMEOUT_SECS", &v)?);
                }
                if let Some(v) = var("RUN_MIGRATIONS") {
                    db = db.with_migrations(parse_bool("RUN_MIGRATIONS", &v)?);
                }
                StoreConfig::Postgres(db)
            }
        };

        let mut config = Self::new(store);
        if let Some(v) = var("BIND_ADDR") {
            config = config.with_bind_addr(parse("BIND_ADDR", &v)?);
        }
        if let Some(v) = var("STATIC_DIR") {
            config = config.with_static_dir(v);
        }

        Ok(config)
    }
}

fn parse_default_addr() -> SocketAddr {
    DEFAULT_BIND_ADDR
        .parse()
        .unwrap_or(SocketAddr::from(([127, 0, 0, 1], 3000)))
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/rail")]))
                .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(
            config.store,
            StoreConfig::Postgres(DatabaseConfig::new("postgres://localhost/rail"))
        );

        let StoreConfig::Postgres(db) = config.store else {
            panic!("expected postgres");
        };
        assert_eq!(db.max_connections, 5);
        assert_eq!(db.acquire_timeout_secs, 5);
        assert!(!db.run_migrations);
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/rail"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("STATIC_DIR", "/srv/www"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "2"),
            ("RUN_MIGRATIONS", "true"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(
            config.store,
            StoreConfig::Postgres(
                DatabaseConfig::new("postgres://db/rail")
                    .with_max_connections(20)
                    .with_acquire_timeout(2)
                    .with_migrations(true)
            )
        );
    }

    #[test]
    fn mock_data_needs_no_database() {
        let config = ServerConfig::from_lookup(lookup(&[("MOCK_DATA", "data/seed.json")])).unwrap();
        assert_eq!(config.store, StoreConfig::Mock(PathBuf::from("data/seed.json")));
    }

    #[test]
    fn missing_database_url() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
        assert_eq!(err.to_string(), "DATABASE_URL must be set");
    }

    #[test]
    fn invalid_values() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/rail"),
            ("DB_MAX_CONNECTIONS", "lots"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: "lots".into()
            }
        );

        let err = ServerConfig::from_lookup(lookup(&[
            ("MOCK_DATA", "seed.json"),
            ("BIND_ADDR", "localhost"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "BIND_ADDR", .. }));
    }

    #[test]
    fn bool_parsing() {
        assert_eq!(parse_bool("X", "YES"), Ok(true));
        assert_eq!(parse_bool("X", "off"), Ok(false));
        assert!(parse_bool("X", "maybe").is_err());
    }
}
