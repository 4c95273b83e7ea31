//! MySQL/MariaDB reachability
//!
//! A full client handshake with the configured credentials. Rejected
//! credentials count as unreachable, same as a refused connection.

use async_trait::async_trait;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::{ConnectOptions, Connection};

use super::{Probe, ProbeError, ProbeResult, Reachable, Service};
use crate::config::DatabaseSettings;

pub struct DatabaseProbe {
    settings: DatabaseSettings,
}

impl DatabaseProbe {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self { settings }
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.settings.endpoint.host)
            .port(self.settings.endpoint.port)
            .username(&self.settings.user)
            .password(&self.settings.password)
            .disable_statement_logging()
    }
}

#[async_trait]
impl Probe for DatabaseProbe {
    fn service(&self) -> Service {
        Service::Database
    }

    fn target(&self) -> String {
        self.settings.endpoint.to_string()
    }

    async fn check(&self) -> ProbeResult<Reachable> {
        let conn = self
            .connect_options()
            .connect()
            .await
            .map_err(|e| ProbeError::connect(self.target(), e))?;

        if let Err(e) = conn.close().await {
            tracing::debug!(endpoint = %self.target(), error = %e, "database close failed");
        }

        Ok(Reachable)
    }
}
