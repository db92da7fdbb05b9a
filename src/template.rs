//! Query template loading.
//!
//! A template file holds one or more SPARQL queries separated by a blank
//! line. Each non-empty fragment becomes a [`QueryUnit`] addressed as
//! `<template_id>-<n>`, numbered from 1 in file order.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{BenchError, Result};

/// File extension of SolidBench query templates.
pub const TEMPLATE_EXTENSION: &str = ".sparql";

/// Separator between queries inside a template file.
pub const QUERY_SEPARATOR: &str = "\n\n";

/// A single executable query extracted from a template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryUnit {
    /// Composite identifier, `<template_id>-<sequence>`.
    pub id: String,
    /// Trimmed query text, never empty.
    pub text: String,
}

impl QueryUnit {
    /// Creates a query unit for the given template and 1-based sequence number.
    pub fn new(template_id: &str, sequence: usize, text: impl Into<String>) -> Self {
        Self {
            id: format!("{template_id}-{sequence}"),
            text: text.into(),
        }
    }
}

/// Splits template content into query units.
///
/// Fragments that are empty after trimming are dropped before numbering,
/// so a trailing separator never produces a phantom unit.
pub fn split_template(template_id: &str, content: &str) -> Vec<QueryUnit> {
    content
        .split(QUERY_SEPARATOR)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .map(|(idx, fragment)| QueryUnit::new(template_id, idx + 1, fragment))
        .collect()
}

/// Returns the template id for a file name, or `None` if it is not a template.
pub fn template_id(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(TEMPLATE_EXTENSION)
}

/// Loads every template in `dir` and returns its query units.
///
/// Files without the template extension are ignored. Templates are read in
/// file name order so repeated loads yield the same unit order.
pub fn load_templates(dir: &Path) -> Result<Vec<QueryUnit>> {
    info!("Loading queries from {}", dir.display());

    let entries = fs::read_dir(dir).map_err(|e| {
        BenchError::load(format!("Failed to read directory {}: {e}", dir.display()))
    })?;

    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            BenchError::load(format!("Failed to read entry in {}: {e}", dir.display()))
        })?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some(id) = template_id(&file_name) {
            templates.push((id.to_string(), entry.path()));
        }
    }
    templates.sort();

    let mut units = Vec::new();
    for (id, path) in templates {
        let content = fs::read_to_string(&path).map_err(|e| {
            BenchError::load(format!("Failed to read template {}: {e}", path.display()))
        })?;
        units.extend(split_template(&id, &content));
    }

    info!("Loaded {} queries", units.len());
    Ok(units)
}
