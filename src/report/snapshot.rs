//! Request-scoped report data

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::inventory::{Capability, RuntimeFacts};
use crate::probe::Service;

/// Outcome of one network probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub service: Service,
    pub reachable: bool,
}

/// State of one local capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityStatus {
    pub capability: Capability,
    pub enabled: bool,
}

/// Everything a single page render shows
///
/// Built fresh for every request and dropped with the response.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    pub generated_at: DateTime<Utc>,
    pub runtime_facts: RuntimeFacts,
    /// Sorted ascending
    pub loaded_modules: Vec<String>,
    pub services: Vec<ServiceStatus>,
    pub capabilities: Vec<CapabilityStatus>,
}

impl ReportSnapshot {
    /// Flat key → state view over services and capabilities
    pub fn status_map(&self) -> BTreeMap<&'static str, bool> {
        self.services
            .iter()
            .map(|s| (s.service.key(), s.reachable))
            .chain(self.capabilities.iter().map(|c| (c.capability.key(), c.enabled)))
            .collect()
    }

    /// Whether a service was reachable. Services that were not probed are not.
    pub fn is_reachable(&self, service: Service) -> bool {
        self.services
            .iter()
            .any(|s| s.service == service && s.reachable)
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.capabilities
            .iter()
            .any(|c| c.capability == capability && c.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ReportSnapshot {
        ReportSnapshot {
            generated_at: Utc::now(),
            runtime_facts: RuntimeFacts::default(),
            loaded_modules: vec![],
            services: vec![
                ServiceStatus {
                    service: Service::Database,
                    reachable: true,
                },
                ServiceStatus {
                    service: Service::CachePrimary,
                    reachable: false,
                },
            ],
            capabilities: vec![CapabilityStatus {
                capability: Capability::ObjectCache,
                enabled: true,
            }],
        }
    }

    #[test]
    fn test_status_map() {
        let map = snapshot().status_map();
        assert_eq!(map.get("database"), Some(&true));
        assert_eq!(map.get("cache-primary"), Some(&false));
        assert_eq!(map.get("object-cache"), Some(&true));
        assert_eq!(map.get("cache-secondary"), None);
    }

    #[test]
    fn test_unprobed_service_is_unreachable() {
        let snapshot = snapshot();
        assert!(snapshot.is_reachable(Service::Database));
        assert!(!snapshot.is_reachable(Service::CacheSecondary));
        assert!(snapshot.is_enabled(Capability::ObjectCache));
        assert!(!snapshot.is_enabled(Capability::Debugger));
    }
}
