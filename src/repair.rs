//! Repair of artifact file names from older runs.
//!
//! Earlier versions of the harness wrote query artifacts as `<id>..rq`.
//! This collapses every `..` in a results directory entry to a single dot.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{BenchError, Result};

/// Returns the repaired file name, or `None` if it needs no repair.
pub fn repaired_name(file_name: &str) -> Option<String> {
    file_name
        .contains("..")
        .then(|| file_name.replace("..", "."))
}

/// Renames every entry in `dir` whose name contains `..`.
///
/// Returns the number of renamed entries.
pub fn fix_artifact_names(dir: &Path) -> Result<usize> {
    let entries = fs::read_dir(dir).map_err(|e| {
        BenchError::persistence(format!("Failed to read directory {}: {e}", dir.display()))
    })?;

    let mut renamed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| {
            BenchError::persistence(format!("Failed to read entry in {}: {e}", dir.display()))
        })?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let Some(new_name) = repaired_name(&file_name) else {
            continue;
        };

        let target = dir.join(&new_name);
        fs::rename(entry.path(), &target).map_err(|e| {
            BenchError::persistence(format!("Failed to rename {file_name} to {new_name}: {e}"))
        })?;
        renamed += 1;
    }

    info!("Renamed {} files in {}", renamed, dir.display());
    Ok(renamed)
}
