//! Markdown summary of persisted run records.
//!
//! Reads only the metadata artifacts of a results directory, so a summary
//! can be produced at any time after (or during) a run without re-running
//! queries.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{BenchError, Result};
use crate::recorder::{read_metadata, QueryMetadata, META_SUFFIX};

/// File name of the rendered summary inside the results directory.
pub const SUMMARY_FILE: &str = "README.md";

const HEADER: &str = "| Query | Success | Results | Time (s) |\n";
const ALIGNMENT: &str = "| - | - | -:| -:|\n";

/// Sort key for a query id.
///
/// SolidBench ids look like `interactive-complex-10-3`. Those compare
/// by prefix and kind, then numerically by template and instance. Any
/// other id sorts after them by its raw text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// A `<prefix>-<kind>-<template>-<instance>` id with numeric counters.
    Structured {
        prefix: String,
        kind: String,
        template: u64,
        instance: u64,
    },
    /// Any other id, compared as text.
    Raw(String),
}

impl SortKey {
    /// Parses a query id into its sort key.
    pub fn parse(id: &str) -> Self {
        let parts: Vec<&str> = id.split('-').collect();
        if let [prefix, kind, template, instance] = parts.as_slice() {
            if let (Ok(template), Ok(instance)) =
                (template.parse::<u64>(), instance.parse::<u64>())
            {
                return Self::Structured {
                    prefix: (*prefix).to_string(),
                    kind: (*kind).to_string(),
                    template,
                    instance,
                };
            }
        }
        Self::Raw(id.to_string())
    }
}

/// Compares two query ids in summary order.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    SortKey::parse(a).cmp(&SortKey::parse(b))
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Query unit id.
    pub id: String,
    /// Metadata read from `<id>-meta.json`.
    pub metadata: QueryMetadata,
}

impl SummaryRow {
    /// Renders the row as a markdown table line.
    pub fn to_markdown(&self) -> String {
        format!(
            "| {} | {} | {} | {} |\n",
            self.id,
            if self.metadata.success { "yes" } else { "no" },
            self.metadata.results,
            format_seconds(self.metadata.time_seconds)
        )
    }
}

/// Collects summary rows from the metadata artifacts in `dir`, sorted by id.
pub fn collect_rows(dir: &Path) -> Result<Vec<SummaryRow>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        BenchError::report(format!("Failed to read results directory {}: {e}", dir.display()))
    })?;

    let mut rows = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            BenchError::report(format!("Failed to read entry in {}: {e}", dir.display()))
        })?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let Some(id) = file_name.strip_suffix(META_SUFFIX) else {
            continue;
        };
        rows.push(SummaryRow {
            id: id.to_string(),
            metadata: read_metadata(&entry.path())?,
        });
    }

    rows.sort_by(|a, b| compare_ids(&a.id, &b.id));
    Ok(rows)
}

/// Renders the markdown summary table for the records in `dir`.
pub fn render_summary(dir: &Path) -> Result<String> {
    let rows = collect_rows(dir)?;
    let mut markdown = String::from(HEADER);
    markdown.push_str(ALIGNMENT);
    for row in &rows {
        markdown.push_str(&row.to_markdown());
    }
    Ok(markdown)
}

/// Renders the summary for `dir` and writes it to `dir/README.md`.
///
/// Returns the path of the written file.
pub fn write_summary(dir: &Path) -> Result<PathBuf> {
    let markdown = render_summary(dir)?;
    let target = dir.join(SUMMARY_FILE);
    fs::write(&target, markdown)
        .map_err(|e| BenchError::report(format!("Failed to write {}: {e}", target.display())))?;
    info!("Wrote summary to {}", target.display());
    Ok(target)
}

/// Formats seconds rounded to 4 decimal places.
///
/// Whole numbers keep one decimal (`3.0`) so the column reads uniformly.
fn format_seconds(seconds: f64) -> String {
    let rounded = (seconds * 10_000.0).round() / 10_000.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}
