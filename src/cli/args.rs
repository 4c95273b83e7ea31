//! CLI argument definitions using clap
//!
//! Commands:
//! - stack-status serve [--host] [--port] [--probe-timeout-ms] [--cors-origin]
//! - stack-status render [--output <path>] [--probe-timeout-ms]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Status page for a PHP service stack
#[derive(Parser, Debug)]
#[command(name = "stack-status")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the status page over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Origin allowed to fetch /status.json (repeatable; none means any)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,

        #[command(flatten)]
        probe: ProbeArgs,
    },

    /// Probe once and write the page to stdout or a file
    Render {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        probe: ProbeArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Upper bound for each dependency probe, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub probe_timeout_ms: u64,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["stack-status", "serve"]).unwrap();
        match cli.command {
            Command::Serve {
                host,
                port,
                cors_origins,
                probe,
            } => {
                assert_eq!(host, "0.0.0.0");
                assert_eq!(port, 8080);
                assert!(cors_origins.is_empty());
                assert_eq!(probe.probe_timeout_ms, 1000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.log_json);
    }

    #[test]
    fn test_render_with_output() {
        let cli = Cli::try_parse_from([
            "stack-status",
            "render",
            "--output",
            "status.html",
            "--probe-timeout-ms",
            "250",
            "--log-json",
        ])
        .unwrap();
        match cli.command {
            Command::Render { output, probe } => {
                assert_eq!(output, Some(PathBuf::from("status.html")));
                assert_eq!(probe.probe_timeout_ms, 250);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(cli.log_json);
    }

    #[test]
    fn test_repeated_cors_origin() {
        let cli = Cli::try_parse_from([
            "stack-status",
            "serve",
            "--cors-origin",
            "http://a.test",
            "--cors-origin",
            "http://b.test",
        ])
        .unwrap();
        match cli.command {
            Command::Serve { cors_origins, .. } => assert_eq!(cors_origins.len(), 2),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
