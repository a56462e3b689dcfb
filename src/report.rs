//! Rendering of a [`DomainReport`] as detailed text, a summary table or JSON.

use clap::ValueEnum;
use colored::Colorize;
use serde::Deserialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::inspect::DomainReport;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Records, summaries and the numbered checklist
    #[default]
    Text,
    /// One-row PASS/FAIL table
    Summary,
    /// The full report as JSON
    Json,
}

/// Render `report` in `format`.
pub fn render(report: &DomainReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_detailed(report)),
        OutputFormat::Summary => Ok(render_summary(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// Records found, evaluator summaries and the seven-item checklist.
pub fn render_detailed(report: &DomainReport) -> String {
    let mut lines = vec![
        format!("MX records: [{}]", report.mx_records.join(" ")),
        format!("SPF records: [{}]", report.spf_records.join(" ")),
        report.spf_summary.clone(),
        report.dmarc_summary.clone(),
    ];

    if report.dkim_present() {
        lines.push("DKIM Records found:".to_string());
        for record in &report.dkim_records {
            lines.push(format!("Selector: {}, Record: {}", record.selector, record.record));
        }
    } else {
        lines.push("No DKIM records found.".to_string());
    }

    let spf = &report.spf;
    let dmarc = &report.dmarc;
    let checks = [
        ("SPF Record is present", spf.record_found),
        ("SPF Record is a single record", spf.single_record),
        ("SPF Record has a Hard Fail Qualifier", spf.qualifier_hard_fail),
        ("DMARC Record is present", dmarc.record_found),
        ("DMARC Record is a single record", dmarc.single_record),
        (
            "DMARC Policy and Subdomain Policy is reject",
            dmarc.policy_reject && dmarc.subdomain_policy_reject,
        ),
        ("DKIM Record is present", report.dkim_present()),
    ];

    lines.push(String::new());
    lines.push("Test Results:".to_string());
    for (i, (label, passed)) in checks.iter().enumerate() {
        lines.push(format!("{}. {}: {}", i + 1, label, passed));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "SPF")]
    spf: String,
    #[tabled(rename = "DMARC")]
    dmarc: String,
    #[tabled(rename = "DKIM")]
    dkim: String,
}

fn status(passed: bool) -> String {
    if passed {
        "PASS".green().to_string()
    } else {
        "FAIL".red().to_string()
    }
}

/// One-row table of overall SPF, DMARC and DKIM verdicts.
pub fn render_summary(report: &DomainReport) -> String {
    let rows = vec![SummaryRow {
        domain: report.domain.clone(),
        spf: status(report.spf.all_tests_passed),
        dmarc: status(report.dmarc.all_tests_passed),
        dkim: status(report.dkim_present()),
    }];

    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn render_json(report: &DomainReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
