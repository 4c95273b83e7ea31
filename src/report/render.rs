//! HTML rendering
//!
//! Every value that comes from the runtime, the environment or a module
//! name goes through [`escape_html`] before it reaches the markup.

use std::fmt::{self, Write};

use super::escape::escape_html;
use super::snapshot::ReportSnapshot;

/// A rendered status page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const PROJECT_URL: &str = "https://github.com/kevinpareek/turbo-stack";

const STYLE: &str = r#"
:root { --accent: #6366f1; --ok: #10b981; --bad: #ef4444; --bg: #0f172a; --card: #1e293b; --text: #e2e8f0; --muted: #94a3b8; }
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; background: var(--bg); color: var(--text); padding: 2rem; }
main { max-width: 1100px; margin: 0 auto; }
header { text-align: center; margin-bottom: 2.5rem; }
h1 { font-size: 2.2rem; color: var(--accent); }
.subtitle, footer { color: var(--muted); }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(340px, 1fr)); gap: 1.5rem; }
.card { background: var(--card); border-radius: 0.75rem; padding: 1.5rem; border: 1px solid rgba(255,255,255,0.08); }
.card.wide { grid-column: 1 / -1; }
.card h2 { font-size: 1.05rem; color: var(--accent); margin-bottom: 1rem; }
.row { display: flex; justify-content: space-between; padding: 0.5rem 0; border-bottom: 1px solid rgba(255,255,255,0.05); }
.row:last-child { border-bottom: none; }
.label { color: var(--muted); }
.value { font-weight: 500; }
.status { padding: 0.2rem 0.7rem; border-radius: 1rem; font-size: 0.85rem; }
.status-ok { background: rgba(16,185,129,0.2); color: var(--ok); }
.status-error { background: rgba(239,68,68,0.2); color: var(--bad); }
.modules { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.module { background: rgba(99,102,241,0.2); color: var(--accent); padding: 0.25rem 0.7rem; border-radius: 0.5rem; font-size: 0.8rem; }
footer { text-align: center; margin-top: 2.5rem; font-size: 0.9rem; }
footer a { color: var(--accent); text-decoration: none; }
footer a:hover { text-decoration: underline; }
footer .generated { margin-top: 0.5rem; font-size: 0.8rem; }
"#;

/// Render a snapshot into a complete HTML document
pub fn render(snapshot: &ReportSnapshot) -> Document {
    let mut html = String::with_capacity(8 * 1024);
    // Writing into a String cannot fail.
    let _ = write_document(&mut html, snapshot);
    Document(html)
}

fn write_document(out: &mut String, snapshot: &ReportSnapshot) -> fmt::Result {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str("<title>PHP Turbo Stack</title>\n");
    writeln!(out, "<style>{}</style>", STYLE)?;
    out.push_str("</head>\n<body>\n<main>\n");

    out.push_str("<header>\n<h1>PHP Turbo Stack</h1>\n");
    out.push_str("<p class=\"subtitle\">High-performance PHP development environment</p>\n</header>\n");

    out.push_str("<div class=\"grid\">\n");
    write_facts(out, snapshot)?;
    write_statuses(out, snapshot)?;
    write_modules(out, snapshot)?;
    out.push_str("</div>\n");

    out.push_str("<footer>\n<p><a href=\"");
    out.push_str(PROJECT_URL);
    out.push_str("\" target=\"_blank\">PHP Turbo Stack</a> &nbsp;|&nbsp; Run <code>tbs help</code> for commands</p>\n");
    writeln!(
        out,
        "<p class=\"generated\">Generated {} by stack-status {}</p>\n</footer>",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        env!("CARGO_PKG_VERSION"),
    )?;
    out.push_str("</main>\n</body>\n</html>\n");
    Ok(())
}

fn write_facts(out: &mut String, snapshot: &ReportSnapshot) -> fmt::Result {
    out.push_str("<section class=\"card\" id=\"runtime\">\n<h2>System Information</h2>\n");
    for (label, value) in snapshot.runtime_facts.rows() {
        writeln!(
            out,
            "<div class=\"row\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>",
            label,
            escape_html(&value),
        )?;
    }
    out.push_str("</section>\n");
    Ok(())
}

fn write_status_row(
    out: &mut String,
    key: &str,
    label: &str,
    up: bool,
    (on, off): (&str, &str),
) -> fmt::Result {
    let (class, glyph, text) = if up {
        ("status-ok", '●', on)
    } else {
        ("status-error", '○', off)
    };
    writeln!(
        out,
        "<div class=\"row\" data-service=\"{}\"><span class=\"label\">{}</span><span class=\"status {}\">{} {}</span></div>",
        key, label, class, glyph, text,
    )
}

fn write_statuses(out: &mut String, snapshot: &ReportSnapshot) -> fmt::Result {
    out.push_str("<section class=\"card\" id=\"services\">\n<h2>Service Status</h2>\n");
    for status in &snapshot.services {
        write_status_row(
            out,
            status.service.key(),
            status.service.label(),
            status.reachable,
            ("Connected", "Disconnected"),
        )?;
    }
    for status in &snapshot.capabilities {
        write_status_row(
            out,
            status.capability.key(),
            status.capability.label(),
            status.enabled,
            ("Enabled", "Disabled"),
        )?;
    }
    out.push_str("</section>\n");
    Ok(())
}

fn write_modules(out: &mut String, snapshot: &ReportSnapshot) -> fmt::Result {
    out.push_str("<section class=\"card wide\" id=\"modules\">\n<h2>Loaded PHP Extensions</h2>\n");
    out.push_str("<div class=\"modules\">\n");
    for module in &snapshot.loaded_modules {
        writeln!(out, "<span class=\"module\">{}</span>", escape_html(module))?;
    }
    out.push_str("</div>\n</section>\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Capability, RuntimeFacts};
    use crate::probe::Service;
    use crate::report::snapshot::{CapabilityStatus, ServiceStatus};
    use chrono::Utc;

    fn snapshot(modules: &[&str], up: bool) -> ReportSnapshot {
        ReportSnapshot {
            generated_at: Utc::now(),
            runtime_facts: RuntimeFacts {
                version: "8.3.4".into(),
                memory_limit: "128M".into(),
                max_execution_time: "30".into(),
                ..Default::default()
            },
            loaded_modules: modules.iter().map(|m| m.to_string()).collect(),
            services: Service::ALL
                .iter()
                .map(|s| ServiceStatus {
                    service: *s,
                    reachable: up,
                })
                .collect(),
            capabilities: Capability::ALL
                .iter()
                .map(|c| CapabilityStatus {
                    capability: *c,
                    enabled: up,
                })
                .collect(),
        }
    }

    fn module_tags(html: &str) -> Vec<&str> {
        html.split("<span class=\"module\">")
            .skip(1)
            .filter_map(|rest| rest.split("</span>").next())
            .collect()
    }

    #[test]
    fn test_facts_rendered() {
        let doc = render(&snapshot(&[], true));
        assert!(doc.as_str().contains("<span class=\"value\">8.3.4</span>"));
        assert!(doc.as_str().contains("<span class=\"value\">128M</span>"));
        assert!(doc.as_str().contains("<span class=\"value\">30s</span>"));
    }

    #[test]
    fn test_module_order_preserved() {
        let doc = render(&snapshot(&["Core", "apcu", "redis"], true));
        assert_eq!(module_tags(doc.as_str()), vec!["Core", "apcu", "redis"]);
    }

    #[test]
    fn test_module_name_escaped() {
        let doc = render(&snapshot(&["<script>alert(1)</script>"], true));
        let html = doc.as_str();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_fact_value_escaped() {
        let mut snap = snapshot(&[], true);
        snap.runtime_facts.operating_system = "Linux <b>".into();
        let doc = render(&snap);
        assert!(doc.as_str().contains("Linux &lt;b&gt;"));
    }

    #[test]
    fn test_branding_and_footer() {
        let doc = render(&snapshot(&[], true));
        let html = doc.as_str();
        assert!(html.contains("<title>PHP Turbo Stack</title>"));
        assert!(html.contains("<h1>PHP Turbo Stack</h1>"));
        assert!(html.contains("href=\"https://github.com/kevinpareek/turbo-stack\""));
        assert!(html.contains("Run <code>tbs help</code> for commands"));
        assert!(html.contains("by stack-status "));
    }

    #[test]
    fn test_all_up() {
        let doc = render(&snapshot(&[], true));
        let html = doc.as_str();
        assert_eq!(html.matches("status-ok\">● Connected").count(), 3);
        assert_eq!(html.matches("status-ok\">● Enabled").count(), 3);
        assert!(!html.contains("status status-error"));
    }

    #[test]
    fn test_all_down() {
        let doc = render(&snapshot(&[], false));
        let html = doc.as_str();
        assert_eq!(html.matches("status-error\">○ Disconnected").count(), 3);
        assert_eq!(html.matches("status-error\">○ Disabled").count(), 3);
        assert!(!html.contains("status status-ok"));
    }
}
