//! Memcached reachability
//!
//! Connects with the async client and asks for `stats`, the same signal as
//! a non-false `getStats()`. The client owns its socket and closes it when
//! dropped at the end of `check`.

use async_memcached::Client;
use async_trait::async_trait;

use super::{Probe, ProbeError, ProbeResult, Reachable, Service};
use crate::config::Endpoint;

pub struct MemcachedProbe {
    endpoint: Endpoint,
}

impl MemcachedProbe {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    fn dsn(&self) -> String {
        format!("tcp://{}", self.endpoint)
    }
}

#[async_trait]
impl Probe for MemcachedProbe {
    fn service(&self) -> Service {
        Service::CacheSecondary
    }

    fn target(&self) -> String {
        self.endpoint.to_string()
    }

    async fn check(&self) -> ProbeResult<Reachable> {
        let mut client = Client::new(self.dsn().as_str())
            .await
            .map_err(|e| ProbeError::connect(self.target(), e))?;

        client
            .stats()
            .await
            .map_err(|e| ProbeError::protocol(self.target(), &e.to_string()))?;

        Ok(Reachable)
    }
}
