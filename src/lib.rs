//! stack-status - status page for a PHP service stack
//!
//! Reports the local PHP runtime configuration and whether the database,
//! Redis and Memcached behind it can be reached.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod inventory;
pub mod logging;
pub mod probe;
pub mod report;
