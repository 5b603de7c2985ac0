//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one line per difference.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use zonediff_core::{ComparisonReport, RecordSet};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string; plain uses `plain_fn`.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => plain_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Comparison report ────────────────────────────────────────────────

#[derive(Tabled)]
struct DiffRow {
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    record_type: &'static str,
    #[tabled(rename = "Set ID")]
    set_identifier: String,
    #[tabled(rename = "Old")]
    old: String,
    #[tabled(rename = "New")]
    new: String,
}

impl DiffRow {
    fn new(status: &'static str, old: &RecordSet, new: Option<&RecordSet>) -> Self {
        Self {
            status,
            name: old.name.clone(),
            record_type: old.record_type.as_str(),
            set_identifier: old.set_identifier.clone().unwrap_or_default(),
            old: describe(old),
            new: new.map(describe).unwrap_or_default(),
        }
    }
}

/// `TTL values` for table cells, e.g. `300 192.0.2.1, 192.0.2.2`.
fn describe(record: &RecordSet) -> String {
    match record.ttl {
        Some(ttl) => format!("{ttl} {}", record.display_values()),
        None => record.display_values(),
    }
}

/// Render a comparison report in the chosen format.
pub fn render_report(format: OutputFormat, report: &ComparisonReport, color: bool) -> String {
    render_single(format, report, |r| report_table(r, color), report_plain)
}

fn report_table(report: &ComparisonReport, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Old zone: {} ({}, {} record sets)",
        report.old_zone.name, report.old_zone.id, report.old_count
    );
    if let (Some(zone), Some(count)) = (&report.new_zone, report.new_count) {
        let _ = writeln!(out, "New zone: {} ({}, {count} record sets)", zone.name, zone.id);
    }

    match &report.diff {
        None => {
            let _ = writeln!(out, "\nInventory only, no comparison performed.");
        }
        Some(diff) if diff.is_clean() => {
            let line = "\nNo differences: every old record set is present and identical.";
            let _ = writeln!(out, "{}", paint(line, color, Paint::Good));
        }
        Some(diff) => {
            let rows: Vec<DiffRow> = diff
                .missing
                .iter()
                .map(|old| DiffRow::new("missing", old, None))
                .chain(
                    diff.mismatched
                        .iter()
                        .map(|pair| DiffRow::new("mismatched", &pair.old, Some(&pair.new))),
                )
                .collect();
            let _ = writeln!(out, "\n{}", Table::new(rows).with(Style::rounded()));

            let summary = format!(
                "{} missing, {} mismatched",
                diff.missing.len(),
                diff.mismatched.len()
            );
            let _ = writeln!(out, "{}", paint(&summary, color, Paint::Bad));
        }
    }

    if !report.artifacts.is_empty() {
        let _ = writeln!(out, "\nArtifacts:");
        for path in &report.artifacts {
            let _ = writeln!(out, "  {}", path.display());
        }
    }

    out.trim_end().to_owned()
}

/// `status name TYPE`, one line per difference.
fn report_plain(report: &ComparisonReport) -> String {
    let Some(diff) = &report.diff else {
        return String::new();
    };
    diff.missing
        .iter()
        .map(|r| format!("missing {} {}", r.name, r.record_type))
        .chain(
            diff.mismatched
                .iter()
                .map(|p| format!("mismatched {} {}", p.old.name, p.old.record_type)),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Clone, Copy)]
enum Paint {
    Good,
    Bad,
}

fn paint(text: &str, color: bool, paint: Paint) -> String {
    if !color {
        return text.to_owned();
    }
    match paint {
        Paint::Good => text.green().to_string(),
        Paint::Bad => text.red().bold().to_string(),
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}
