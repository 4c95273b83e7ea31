//! # Runtime Inventory
//!
//! Static, per-process facts about the PHP runtime being reported on:
//! interpreter version and limits, loaded extensions, and local capability
//! flags. A [`CapabilityRegistry`] is queried once at startup and frozen into
//! a [`RuntimeInventory`] shared by every request.

mod errors;
mod php;

pub use errors::{InventoryError, InventoryResult};
pub use php::PhpRuntime;

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// In-process feature reported without any network access
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Opcode cache (OPcache)
    BytecodeCache,
    /// Shared-memory user cache (APCu)
    ObjectCache,
    /// Step debugger (Xdebug)
    Debugger,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::BytecodeCache,
        Capability::ObjectCache,
        Capability::Debugger,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Capability::BytecodeCache => "bytecode-cache",
            Capability::ObjectCache => "object-cache",
            Capability::Debugger => "debugger",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Capability::BytecodeCache => "OPcache",
            Capability::ObjectCache => "APCu",
            Capability::Debugger => "Xdebug",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The six runtime facts shown on the page
///
/// Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeFacts {
    pub version: String,
    pub process_model: String,
    pub operating_system: String,
    pub memory_limit: String,
    /// Seconds, without unit
    pub max_execution_time: String,
    pub upload_max_filesize: String,
}

impl RuntimeFacts {
    /// Label/value pairs in display order
    pub fn rows(&self) -> [(&'static str, String); 6] {
        let execution_time = if self.max_execution_time.is_empty() {
            String::new()
        } else {
            format!("{}s", self.max_execution_time)
        };

        [
            ("PHP Version", self.version.clone()),
            ("Web Server", self.process_model.clone()),
            ("Operating System", self.operating_system.clone()),
            ("Memory Limit", self.memory_limit.clone()),
            ("Max Execution Time", execution_time),
            ("Upload Max Size", self.upload_max_filesize.clone()),
        ]
    }
}

/// Source of runtime facts, extensions and capability flags
pub trait CapabilityRegistry {
    fn runtime_facts(&self) -> RuntimeFacts;

    /// Active optional extensions, in any order
    fn loaded_modules(&self) -> Vec<String>;

    /// Whether a local capability is active. Absent capabilities are `false`.
    fn capability(&self, capability: Capability) -> bool;
}

/// Frozen snapshot of a registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeInventory {
    facts: RuntimeFacts,
    modules: Vec<String>,
    capabilities: BTreeSet<Capability>,
}

impl RuntimeInventory {
    /// Query a registry once and keep the answers
    pub fn from_registry(registry: &dyn CapabilityRegistry) -> Self {
        let mut modules = registry.loaded_modules();
        modules.sort();
        modules.dedup();

        let capabilities = Capability::ALL
            .into_iter()
            .filter(|c| registry.capability(*c))
            .collect();

        Self {
            facts: registry.runtime_facts(),
            modules,
            capabilities,
        }
    }

    pub fn facts(&self) -> &RuntimeFacts {
        &self.facts
    }

    /// Loaded modules, sorted ascending
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FixedRegistry;
    use super::*;

    #[test]
    fn test_modules_sorted() {
        let registry = FixedRegistry::with_modules(&["redis", "Core", "apcu", "mysqli"]);
        let inventory = RuntimeInventory::from_registry(&registry);
        assert_eq!(inventory.modules(), &["Core", "apcu", "mysqli", "redis"]);
    }

    #[test]
    fn test_absent_capabilities_are_false() {
        let inventory = RuntimeInventory::from_registry(&FixedRegistry::default());
        for capability in Capability::ALL {
            assert!(!inventory.has(capability));
        }
    }

    #[test]
    fn test_present_capability() {
        let registry = FixedRegistry {
            capabilities: vec![Capability::BytecodeCache],
            ..Default::default()
        };
        let inventory = RuntimeInventory::from_registry(&registry);
        assert!(inventory.has(Capability::BytecodeCache));
        assert!(!inventory.has(Capability::ObjectCache));
    }

    #[test]
    fn test_fact_rows_order_and_suffix() {
        let facts = RuntimeFacts {
            version: "8.3.4".into(),
            process_model: "PHP-FPM + Nginx".into(),
            operating_system: "Linux 6.1.0".into(),
            memory_limit: "256M".into(),
            max_execution_time: "30".into(),
            upload_max_filesize: "64M".into(),
        };
        let rows = facts.rows();
        let labels: Vec<_> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec![
                "PHP Version",
                "Web Server",
                "Operating System",
                "Memory Limit",
                "Max Execution Time",
                "Upload Max Size"
            ]
        );
        assert_eq!(rows[4].1, "30s");
    }

    #[test]
    fn test_missing_facts_render_empty() {
        let rows = RuntimeFacts::default().rows();
        assert!(rows.iter().all(|(_, value)| value.is_empty()));
    }
}
