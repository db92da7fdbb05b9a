//! Command-line argument parsing for sparql-bench.
//!
//! Flags take precedence over environment variables, which take precedence
//! over the config file.

use crate::config::Config;
use crate::endpoint::EndpointConfig;
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Benchmark harness for SPARQL endpoints.
#[derive(Parser, Debug)]
#[command(name = "sparql-bench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute all query templates and record the results
    Run(RunArgs),
    /// Render README.md from recorded results
    Summary(OutputArgs),
    /// Repair artifact names written as `<id>..rq` by older runs
    FixNames(OutputArgs),
}

/// Arguments of the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the SolidBench query templates
    #[arg(long, value_name = "DIR", env = "SPARQL_BENCH_QUERIES")]
    pub queries: Option<PathBuf>,

    /// The output path for results
    #[arg(long, value_name = "DIR", env = "SPARQL_BENCH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// The SPARQL endpoint URI
    #[arg(long, value_name = "URI", env = "SPARQL_BENCH_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

/// Arguments of subcommands that only work on the results directory.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// The results directory
    #[arg(long, value_name = "DIR", env = "SPARQL_BENCH_OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Fully resolved settings for a benchmark run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Directory holding the query templates.
    pub queries: PathBuf,
    /// Directory run records are written to.
    pub output: PathBuf,
    /// Endpoint client configuration.
    pub endpoint: EndpointConfig,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}

impl RunArgs {
    /// Merges the arguments over the config file values.
    pub fn resolve(&self, config: &Config) -> Result<RunSettings> {
        let mut endpoint = config.endpoint.clone();
        if let Some(uri) = &self.endpoint {
            endpoint.uri = uri.clone();
        }
        if self.timeout.is_some() {
            endpoint.timeout_secs = self.timeout;
        }

        Ok(RunSettings {
            queries: self
                .queries
                .clone()
                .unwrap_or_else(|| config.paths.queries.clone()),
            output: self
                .output
                .clone()
                .unwrap_or_else(|| config.paths.output.clone()),
            endpoint: endpoint.to_endpoint_config()?,
        })
    }
}

impl OutputArgs {
    /// Returns the results directory, falling back to the config file value.
    pub fn resolve(&self, config: &Config) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| config.paths.output.clone())
    }
}
