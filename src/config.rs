//! Configuration management for sparql-bench.
//!
//! Handles loading benchmark settings from a TOML file. Command-line flags
//! and environment variables are layered on top in [`crate::cli`].

use crate::endpoint::{EndpointConfig, DEFAULT_ENDPOINT};
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default directory of query templates, relative to the project root.
pub const DEFAULT_QUERIES_DIR: &str = "out-queries";

/// Default directory for run records, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "results";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointSettings,

    /// Input and output locations.
    #[serde(default)]
    pub paths: PathSettings,
}

/// SPARQL endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Endpoint URI.
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Request timeout in seconds. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

fn default_uri() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            timeout_secs: None,
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory holding `*.sparql` templates.
    #[serde(default = "default_queries")]
    pub queries: PathBuf,

    /// Directory run records and the summary are written to.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_queries() -> PathBuf {
    PathBuf::from(DEFAULT_QUERIES_DIR)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            queries: default_queries(),
            output: default_output(),
        }
    }
}

impl EndpointSettings {
    /// Validates the URI and builds the client configuration.
    pub fn to_endpoint_config(&self) -> Result<EndpointConfig> {
        let url = Url::parse(&self.uri)
            .map_err(|e| BenchError::config(format!("Invalid endpoint URI '{}': {e}", self.uri)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(BenchError::config(format!(
                "Invalid scheme '{}'. Expected 'http' or 'https'",
                url.scheme()
            )));
        }

        let config = EndpointConfig::new(self.uri.clone());
        match self.timeout_secs {
            Some(0) => Err(BenchError::config(
                "timeout_secs must be at least 1; omit it to wait indefinitely",
            )),
            Some(secs) => Ok(config.with_timeout(Duration::from_secs(secs))),
            None => Ok(config),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sparql-bench")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file, or defaults if it does not exist.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| BenchError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            BenchError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
