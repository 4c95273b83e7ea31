//! CLI command implementations
//!
//! Both commands share the same boot sequence: read the environment into a
//! [`StackConfig`], discover the PHP runtime once, build the reporter.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use axum::http::HeaderValue;

use crate::config::StackConfig;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::inventory::{PhpRuntime, RuntimeInventory};
use crate::logging::{init_logging, LogFormat};
use crate::report::StatusReporter;

use super::args::{Cli, Command, ProbeArgs};
use super::errors::{CliError, CliResult};

/// Upper bound for the one-off PHP discovery run
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match cmd {
        Command::Serve {
            host,
            port,
            cors_origins,
            probe,
        } => {
            let http_config = HttpServerConfig {
                host,
                port,
                cors_origins,
            };
            rt.block_on(serve(http_config, &probe))
        }
        Command::Render { output, probe } => rt.block_on(render(output.as_deref(), &probe)),
    }
}

/// Serve the status page until interrupted
pub async fn serve(http_config: HttpServerConfig, probe: &ProbeArgs) -> CliResult<()> {
    check_cors_origins(&http_config.cors_origins)?;
    let reporter = boot(probe).await?;
    let server = HttpServer::with_config(http_config, reporter);

    server
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// Probe once and write the page
pub async fn render(output: Option<&Path>, probe: &ProbeArgs) -> CliResult<()> {
    let reporter = boot(probe).await?;
    write_page(&reporter, output).await
}

/// Render through `reporter` into `output`, or stdout when `None`
pub async fn write_page(reporter: &StatusReporter, output: Option<&Path>) -> CliResult<()> {
    let document = reporter.probe_and_render().await;

    match output {
        Some(path) => {
            tokio::fs::write(path, document.as_str()).await.map_err(|e| {
                CliError::io_error(format!("Failed to write {}: {}", path.display(), e))
            })?;
            tracing::info!(path = %path.display(), "status page written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_str().as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Each `--cors-origin` must be a bare `http(s)://host[:port]` origin
fn check_cors_origins(origins: &[String]) -> CliResult<()> {
    for origin in origins {
        let rest = origin
            .strip_prefix("https://")
            .or_else(|| origin.strip_prefix("http://"));
        let valid = match rest {
            Some(authority) => {
                !authority.is_empty()
                    && !authority.contains('/')
                    && HeaderValue::from_str(origin).is_ok()
            }
            None => false,
        };
        if !valid {
            return Err(CliError::config_error(format!(
                "invalid --cors-origin '{}': expected scheme://host[:port]",
                origin
            )));
        }
    }
    Ok(())
}

fn stack_config(probe: &ProbeArgs) -> CliResult<StackConfig> {
    if probe.probe_timeout_ms == 0 {
        return Err(CliError::config_error("--probe-timeout-ms must be > 0"));
    }

    Ok(StackConfig::from_env().with_probe_timeout(Duration::from_millis(probe.probe_timeout_ms)))
}

async fn boot(probe: &ProbeArgs) -> CliResult<StatusReporter> {
    let config = stack_config(probe)?;
    tracing::info!(
        database = %config.database.endpoint,
        database_user = %config.database.user,
        cache_primary = %config.cache_primary,
        cache_secondary = %config.cache_secondary,
        probe_timeout_ms = probe.probe_timeout_ms,
        "configuration loaded"
    );

    let inventory = discover_inventory(&config.php_binary).await;
    Ok(StatusReporter::new(inventory, &config))
}

/// Query the PHP runtime once; an unusable runtime yields an empty inventory
pub async fn discover_inventory(php_binary: &str) -> RuntimeInventory {
    match PhpRuntime::discover(php_binary, DISCOVERY_TIMEOUT).await {
        Ok(runtime) => {
            let inventory = RuntimeInventory::from_registry(&runtime);
            tracing::info!(
                binary = php_binary,
                version = %inventory.facts().version,
                modules = inventory.modules().len(),
                "PHP runtime discovered"
            );
            inventory
        }
        Err(e) => {
            tracing::warn!(
                binary = php_binary,
                error = %e,
                "PHP runtime discovery failed, runtime facts will be empty"
            );
            RuntimeInventory::default()
        }
    }
}
