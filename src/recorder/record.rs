//! Run record artifacts.
//!
//! Every query unit leaves three files behind: the query text, the result
//! document and a small metadata object. JSON artifacts are written with
//! sorted keys and two-space indentation so reruns diff cleanly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BenchError, Result};

/// Extension of the query text artifact.
pub const QUERY_EXTENSION: &str = "rq";

/// Suffix of the metadata artifact.
pub const META_SUFFIX: &str = "-meta.json";

/// Outcome of executing a single query unit.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// The endpoint returned a parseable result document.
    Success(Value),
    /// The query failed; carries the readable error message.
    Failure(String),
}

impl ExecutionOutcome {
    /// Returns true if the query succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the result document, or an empty object for failures.
    pub fn result(&self) -> Value {
        match self {
            Self::Success(value) => value.clone(),
            Self::Failure(_) => Value::Object(Map::new()),
        }
    }

    /// Returns the error message, if the query failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

/// Metadata persisted alongside each result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetadata {
    /// Error message, `None` on success.
    pub error: Option<String>,
    /// Number of result bindings.
    pub results: u64,
    /// Whether the query succeeded.
    pub success: bool,
    /// Duration of the request/response exchange.
    pub time_seconds: f64,
}

impl QueryMetadata {
    /// Builds metadata from an outcome and its measured duration.
    pub fn from_outcome(outcome: &ExecutionOutcome, elapsed: Duration) -> Self {
        let results = match outcome {
            ExecutionOutcome::Success(value) => count_bindings(value),
            ExecutionOutcome::Failure(_) => 0,
        };
        Self {
            error: outcome.error().map(String::from),
            results,
            success: outcome.is_success(),
            time_seconds: elapsed.as_secs_f64(),
        }
    }
}

/// Counts `results.bindings` in a SPARQL JSON results document.
///
/// Documents without a bindings array (ASK results, error objects) count as 0.
pub fn count_bindings(value: &Value) -> u64 {
    value
        .get("results")
        .and_then(|results| results.get("bindings"))
        .and_then(Value::as_array)
        .map_or(0, |bindings| bindings.len() as u64)
}

/// The three artifacts persisted for one query unit.
#[derive(Debug, Clone)]
pub struct RunRecord<'a> {
    /// Query unit id, used as the file name stem.
    pub id: &'a str,
    /// Query text as sent to the endpoint.
    pub query: &'a str,
    /// Result document, an empty object for failed queries.
    pub result: Value,
    /// Timing and outcome metadata.
    pub metadata: QueryMetadata,
}

impl<'a> RunRecord<'a> {
    /// Creates a record for a finished query unit.
    pub fn new(id: &'a str, query: &'a str, outcome: &ExecutionOutcome, elapsed: Duration) -> Self {
        Self {
            id,
            query,
            result: outcome.result(),
            metadata: QueryMetadata::from_outcome(outcome, elapsed),
        }
    }

    /// Writes all three artifacts into `dir`, replacing any previous files.
    pub fn save(&self, dir: &Path) -> Result<()> {
        write_file(&query_path(dir, self.id), &format!("{}\n", self.query))?;
        write_file(&result_path(dir, self.id), &to_sorted_json(&self.result)?)?;

        let metadata = serde_json::to_value(&self.metadata)
            .map_err(|e| BenchError::persistence(format!("Failed to encode metadata: {e}")))?;
        write_file(&metadata_path(dir, self.id), &to_sorted_json(&metadata)?)
    }
}

/// Path of the query text artifact.
pub fn query_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.{QUERY_EXTENSION}"))
}

/// Path of the result artifact.
pub fn result_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.json"))
}

/// Path of the metadata artifact.
pub fn metadata_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}{META_SUFFIX}"))
}

/// Reads a metadata artifact back from disk.
pub fn read_metadata(path: &Path) -> Result<QueryMetadata> {
    let content = fs::read_to_string(path)
        .map_err(|e| BenchError::report(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| BenchError::report(format!("Malformed metadata in {}: {e}", path.display())))
}

/// Serializes a JSON value with sorted keys, two-space indent and a trailing newline.
///
/// `serde_json::Map` is ordered by key, so objects come out sorted at every level.
fn to_sorted_json(value: &Value) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| BenchError::persistence(format!("Failed to encode JSON: {e}")))?;
    json.push('\n');
    Ok(json)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| BenchError::persistence(format!("Failed to write {}: {e}", path.display())))
}
