//! Status reporter
//!
//! Combines the frozen runtime inventory with a fresh round of probes.

use std::time::{Duration, Instant};

use chrono::Utc;
use futures_util::future::join_all;

use super::render::{render, Document};
use super::snapshot::{CapabilityStatus, ReportSnapshot, ServiceStatus};
use crate::config::StackConfig;
use crate::inventory::{Capability, RuntimeInventory};
use crate::probe::{
    DatabaseProbe, MemcachedProbe, Probe, ProbeError, ProbeResult, Reachable, RedisProbe,
};

/// Probes the stack and renders the status page
pub struct StatusReporter {
    inventory: RuntimeInventory,
    probes: Vec<Box<dyn Probe>>,
    probe_timeout: Duration,
}

impl StatusReporter {
    /// Reporter for the database, Redis and Memcached described by `config`
    pub fn new(inventory: RuntimeInventory, config: &StackConfig) -> Self {
        let probes: Vec<Box<dyn Probe>> = vec![
            Box::new(DatabaseProbe::new(config.database.clone())),
            Box::new(RedisProbe::new(config.cache_primary.clone())),
            Box::new(MemcachedProbe::new(config.cache_secondary.clone())),
        ];
        Self::with_probes(inventory, probes, config.probe_timeout)
    }

    /// Reporter over an explicit probe set
    pub fn with_probes(
        inventory: RuntimeInventory,
        probes: Vec<Box<dyn Probe>>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            inventory,
            probes,
            probe_timeout,
        }
    }

    pub fn inventory(&self) -> &RuntimeInventory {
        &self.inventory
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Run one probe under the shared timeout
    async fn bounded_check(&self, probe: &dyn Probe) -> ProbeResult<Reachable> {
        match tokio::time::timeout(self.probe_timeout, probe.check()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout {
                target: probe.target(),
                timeout: self.probe_timeout,
            }),
        }
    }

    async fn run_probe(&self, probe: &dyn Probe) -> ServiceStatus {
        let started = Instant::now();
        let outcome = self.bounded_check(probe).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let reachable = match outcome {
            Ok(Reachable) => {
                tracing::debug!(
                    service = %probe.service(),
                    endpoint = %probe.target(),
                    elapsed_ms,
                    "probe succeeded"
                );
                true
            }
            Err(e) => {
                tracing::debug!(
                    service = %probe.service(),
                    endpoint = %probe.target(),
                    kind = e.kind(),
                    error = %e,
                    elapsed_ms,
                    "probe failed"
                );
                false
            }
        };

        ServiceStatus {
            service: probe.service(),
            reachable,
        }
    }

    /// Probe every service and collect the report data
    pub async fn snapshot(&self) -> ReportSnapshot {
        let mut services =
            join_all(self.probes.iter().map(|probe| self.run_probe(probe.as_ref()))).await;
        services.sort_by_key(|status| status.service);

        let capabilities = Capability::ALL
            .into_iter()
            .map(|capability| CapabilityStatus {
                capability,
                enabled: self.inventory.has(capability),
            })
            .collect();

        ReportSnapshot {
            generated_at: Utc::now(),
            runtime_facts: self.inventory.facts().clone(),
            loaded_modules: self.inventory.modules().to_vec(),
            services,
            capabilities,
        }
    }

    /// Probe every service and render the page
    pub async fn probe_and_render(&self) -> Document {
        render(&self.snapshot().await)
    }
}
