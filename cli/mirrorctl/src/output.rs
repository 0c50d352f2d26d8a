//! Output formatting for CLI commands.
//!
//! Text output keeps the per-file action lines CI logs rely on, followed by
//! a one-line summary. JSON output is a single object with sorted keys for
//! machine consumers.

use std::path::Path;

use colored::Colorize;
use mirror_reconcile::{HarvestReport, SyncOutcome};
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncSummary<'a> {
    kind: &'a str,
    created: Vec<String>,
    removed: Vec<String>,
    created_count: usize,
    removed_count: usize,
}

/// Print the result of one synchronization stage.
pub fn print_sync_summary(format: OutputFormat, kind: &str, noun: &str, outcome: &SyncOutcome) {
    match format {
        OutputFormat::Text => {
            for path in &outcome.created {
                println!("Created {noun}: {}", path.display());
            }
            for path in &outcome.removed {
                println!("Removed: {}", path.display());
            }
            if outcome.changed() {
                print_success(&format!(
                    "Created {} new {noun} file(s), removed {} orphan(s)",
                    outcome.created.len(),
                    outcome.removed.len()
                ));
            } else {
                print_info("No changes needed");
            }
        }
        OutputFormat::Json => {
            let summary = SyncSummary {
                kind,
                created: outcome
                    .created
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect(),
                removed: outcome
                    .removed
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect(),
                created_count: outcome.created.len(),
                removed_count: outcome.removed.len(),
            };
            print_json(&summary);
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HarvestSummary<'a> {
    kind: &'a str,
    images: usize,
    pinned: usize,
    skipped: usize,
    output: String,
}

/// Print the result of a harvest stage.
pub fn print_harvest_summary(format: OutputFormat, report: &HarvestReport, output: &Path) {
    match format {
        OutputFormat::Text => {
            print_success(&format!(
                "Collected {} pinned reference(s) from {} image(s)",
                report.pinned(),
                report.index.image_count()
            ));
            if report.skipped > 0 {
                print_info(&format!("Skipped {} pin(s) awaiting a digest", report.skipped));
            }
            print_info(&format!("Written to {}", output.display()));
        }
        OutputFormat::Json => {
            let summary = HarvestSummary {
                kind: "harvest-digests",
                images: report.index.image_count(),
                pinned: report.pinned(),
                skipped: report.skipped,
                output: output.display().to_string(),
            };
            print_json(&summary);
        }
    }
}

fn print_json<T: Serialize>(data: &T) {
    let value = serde_json::to_value(data).unwrap_or_else(|_| serde_json::json!({}));
    let sorted = sort_json_value(value);
    let json = serde_json::to_string_pretty(&sorted).unwrap_or_else(|_| "{}".to_string());
    println!("{}", json);
}

fn sort_json_value(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Array(values) => {
            serde_json::Value::Array(values.into_iter().map(sort_json_value).collect())
        }
        serde_json::Value::Object(entries) => {
            let mut pairs: Vec<_> = entries.into_iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            let mut mapped = serde_json::Map::new();
            for (key, value) in pairs {
                mapped.insert(key, sort_json_value(value));
            }
            serde_json::Value::Object(mapped)
        }
        other => other,
    }
}
