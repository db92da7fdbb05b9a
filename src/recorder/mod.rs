//! Run recording for query units.
//!
//! Drives every query unit through an endpoint one after another, measures
//! the request/response exchange and persists a run record per unit. A
//! failing query is recorded and the run moves on.

pub mod record;

pub use record::{
    count_bindings, metadata_path, query_path, read_metadata, result_path, ExecutionOutcome,
    QueryMetadata, RunRecord, META_SUFFIX, QUERY_EXTENSION,
};

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::endpoint::QueryEndpoint;
use crate::error::{BenchError, Result};
use crate::template::QueryUnit;

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Number of query units executed.
    pub total: usize,
    /// Units that returned a result.
    pub succeeded: usize,
    /// Units that failed.
    pub failed: usize,
    /// Wall-clock time of the whole run, including saving artifacts.
    pub elapsed: Duration,
}

/// Executes query units sequentially and persists their run records.
pub struct RunRecorder<'a> {
    endpoint: &'a dyn QueryEndpoint,
    output_dir: PathBuf,
}

impl<'a> RunRecorder<'a> {
    /// Creates a recorder writing into `output_dir`.
    pub fn new(endpoint: &'a dyn QueryEndpoint, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            endpoint,
            output_dir: output_dir.into(),
        }
    }

    /// Runs all units in order.
    ///
    /// Query failures never abort the run. Persistence failures do, leaving
    /// the records written so far on disk.
    pub async fn run(&self, units: &[QueryUnit]) -> Result<RunSummary> {
        info!("Running queries against {}", self.endpoint.uri());
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            BenchError::persistence(format!(
                "Failed to create output directory {}: {e}",
                self.output_dir.display()
            ))
        })?;

        let run_start = Instant::now();
        let mut summary = RunSummary::default();

        for unit in units {
            let (outcome, elapsed) = self.execute(unit).await;
            if outcome.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
            summary.total += 1;

            info!("Saving data in {} for query {}", self.output_dir.display(), unit.id);
            RunRecord::new(&unit.id, &unit.text, &outcome, elapsed).save(&self.output_dir)?;
        }

        summary.elapsed = run_start.elapsed();
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Finished running all queries in ~{} seconds",
            summary.elapsed.as_secs_f64().round()
        );

        Ok(summary)
    }

    /// Executes a single unit, timing only the endpoint exchange.
    pub async fn execute(&self, unit: &QueryUnit) -> (ExecutionOutcome, Duration) {
        info!("Running query {}", unit.id);

        let start = Instant::now();
        let result = self.endpoint.execute(&unit.text).await;
        let elapsed = start.elapsed();

        let outcome = match result {
            Ok(value) => ExecutionOutcome::Success(value),
            Err(e) => {
                error!("Failed to execute query {}: {}", unit.id, e.message());
                ExecutionOutcome::Failure(e.message().to_string())
            }
        };

        (outcome, elapsed)
    }
}
