//! # Service Probes
//!
//! One connectivity check per network dependency. A probe makes a single
//! attempt, holds its connection only for the duration of [`Probe::check`],
//! and reports the outcome as `Result<Reachable, ProbeError>`.
//!
//! Probes do not enforce their own deadline; the reporter wraps every call in
//! the same timeout.

mod database;
mod errors;
mod memcached;
mod redis;

pub use database::DatabaseProbe;
pub use errors::{ProbeError, ProbeResult};
pub use memcached::MemcachedProbe;
pub use redis::RedisProbe;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

/// Network dependency being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    Database,
    CachePrimary,
    CacheSecondary,
}

impl Service {
    /// All services in display order
    pub const ALL: [Service; 3] = [
        Service::Database,
        Service::CachePrimary,
        Service::CacheSecondary,
    ];

    /// Stable key used in the status map
    pub fn key(&self) -> &'static str {
        match self {
            Service::Database => "database",
            Service::CachePrimary => "cache-primary",
            Service::CacheSecondary => "cache-secondary",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Service::Database => "Database (MySQL/MariaDB)",
            Service::CachePrimary => "Redis Cache",
            Service::CacheSecondary => "Memcached",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Proof that a service answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reachable;

/// A single connectivity check
#[async_trait]
pub trait Probe: Send + Sync {
    /// Which service this probe reports on
    fn service(&self) -> Service;

    /// Target description for logs
    fn target(&self) -> String;

    /// Attempt one connection. Any connection opened here is released
    /// before the future resolves or when it is dropped.
    async fn check(&self) -> ProbeResult<Reachable>;
}
