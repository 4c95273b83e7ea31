//! # Status Report
//!
//! Per request: take the precomputed runtime inventory, run every probe,
//! collect a [`ReportSnapshot`] and render it as a [`Document`].
//!
//! Probe failures never escape this module. Each one becomes `false` in the
//! snapshot and the page is produced regardless.

mod escape;
mod render;
mod reporter;
mod snapshot;

pub use escape::escape_html;
pub use render::{render, Document};
pub use reporter::StatusReporter;
pub use snapshot::{CapabilityStatus, ReportSnapshot, ServiceStatus};
