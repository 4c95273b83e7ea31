//! Stack configuration
//!
//! Everything the reporter needs to know about its environment is read
//! exactly once, at startup, into a [`StackConfig`]. Request handlers never
//! touch the process environment.
//!
//! | Variable      | Default    |
//! |---------------|------------|
//! | `DB_HOST`     | `database` |
//! | `DB_USER`     | `docker`   |
//! | `DB_PASSWORD` | `docker`   |
//! | `PHP_BINARY`  | `php`      |
//!
//! An empty value is treated the same as an unset one.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Default hostname of the relational database
pub const DEFAULT_DB_HOST: &str = "database";
/// Default database user
pub const DEFAULT_DB_USER: &str = "docker";
/// Default database password
pub const DEFAULT_DB_PASSWORD: &str = "docker";
/// MySQL/MariaDB port
pub const DB_PORT: u16 = 3306;

/// Fixed Redis endpoint
pub const REDIS_HOST: &str = "redis";
pub const REDIS_PORT: u16 = 6379;

/// Fixed Memcached endpoint
pub const MEMCACHED_HOST: &str = "memcached";
pub const MEMCACHED_PORT: u16 = 11211;

/// Default PHP interpreter used for runtime discovery
pub const DEFAULT_PHP_BINARY: &str = "php";

/// Default bound applied to every probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// A host:port pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Database connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub endpoint: Endpoint,
    pub user: String,
    pub password: String,
}

// Keeps the password out of logs.
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Complete reporter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    pub database: DatabaseSettings,
    pub cache_primary: Endpoint,
    pub cache_secondary: Endpoint,
    pub php_binary: String,
    pub probe_timeout: Duration,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl StackConfig {
    /// Build from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            database: DatabaseSettings {
                endpoint: Endpoint::new(var("DB_HOST", DEFAULT_DB_HOST), DB_PORT),
                user: var("DB_USER", DEFAULT_DB_USER),
                password: var("DB_PASSWORD", DEFAULT_DB_PASSWORD),
            },
            cache_primary: Endpoint::new(REDIS_HOST, REDIS_PORT),
            cache_secondary: Endpoint::new(MEMCACHED_HOST, MEMCACHED_PORT),
            php_binary: var("PHP_BINARY", DEFAULT_PHP_BINARY),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Override the per-probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}
