//! PHP runtime discovery
//!
//! Runs the interpreter once with an inline script that prints a JSON report
//! of its version, SAPI, host OS, limits, loaded extensions and cache state.

use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;

use super::{Capability, CapabilityRegistry, InventoryError, InventoryResult, RuntimeFacts};

const REPORT_SCRIPT: &str = r#"
$opcache = function_exists('opcache_get_status') ? @opcache_get_status(false) : false;
echo json_encode([
    'version' => PHP_VERSION,
    'sapi' => PHP_SAPI,
    'os' => php_uname('s') . ' ' . php_uname('r'),
    'memory_limit' => (string) ini_get('memory_limit'),
    'max_execution_time' => (string) ini_get('max_execution_time'),
    'upload_max_filesize' => (string) ini_get('upload_max_filesize'),
    'extensions' => get_loaded_extensions(),
    'opcache' => is_array($opcache) && !empty($opcache['opcache_enabled']),
    'apcu' => function_exists('apcu_enabled') && apcu_enabled(),
    'xdebug' => extension_loaded('xdebug'),
]);
"#;

/// Report printed by [`REPORT_SCRIPT`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhpRuntime {
    version: String,
    sapi: String,
    os: String,
    memory_limit: String,
    max_execution_time: String,
    upload_max_filesize: String,
    extensions: Vec<String>,
    opcache: bool,
    apcu: bool,
    xdebug: bool,
}

impl PhpRuntime {
    /// Run `binary` and parse its report
    pub async fn discover(binary: &str, timeout: Duration) -> InventoryResult<Self> {
        let child = Command::new(binary)
            .arg("-r")
            .arg(REPORT_SCRIPT)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| InventoryError::Launch {
                binary: binary.to_string(),
                source,
            })?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| InventoryError::Timeout {
                binary: binary.to_string(),
                timeout,
            })?
            .map_err(|source| InventoryError::Launch {
                binary: binary.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(InventoryError::Exit {
                binary: binary.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Self::from_json(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse a report. Unknown keys are ignored, missing ones default.
    pub fn from_json(report: &str) -> InventoryResult<Self> {
        Ok(serde_json::from_str(report.trim())?)
    }
}

/// Name the server setup behind a SAPI
fn process_model(sapi: &str) -> String {
    match sapi {
        "fpm-fcgi" => "PHP-FPM + Nginx".to_string(),
        "apache2handler" => "Apache".to_string(),
        "cli" => "CLI".to_string(),
        other => other.to_string(),
    }
}

impl CapabilityRegistry for PhpRuntime {
    fn runtime_facts(&self) -> RuntimeFacts {
        RuntimeFacts {
            version: self.version.clone(),
            process_model: process_model(&self.sapi),
            operating_system: self.os.trim().to_string(),
            memory_limit: self.memory_limit.clone(),
            max_execution_time: self.max_execution_time.clone(),
            upload_max_filesize: self.upload_max_filesize.clone(),
        }
    }

    fn loaded_modules(&self) -> Vec<String> {
        self.extensions.clone()
    }

    fn capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::BytecodeCache => self.opcache,
            Capability::ObjectCache => self.apcu,
            Capability::Debugger => self.xdebug,
        }
    }
}
