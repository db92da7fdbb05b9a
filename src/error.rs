//! Error types for sparql-bench.
//!
//! Defines the main error enum used throughout the harness.

use thiserror::Error;

/// Main error type for benchmark operations.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Template loading errors (missing directory, unreadable file, etc.)
    #[error("Load error: {0}")]
    Load(String),

    /// Query execution errors (transport failures, unparseable responses, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Run record persistence errors (disk full, permissions, etc.)
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Summary rendering errors (unreadable or malformed metadata, etc.)
    #[error("Report error: {0}")]
    Report(String),

    /// Configuration errors (invalid config file, bad endpoint URI, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BenchError {
    /// Creates a load error with the given message.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a persistence error with the given message.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Creates a report error with the given message.
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Load(_) => "Load Error",
            Self::Query(_) => "Query Error",
            Self::Persistence(_) => "Persistence Error",
            Self::Report(_) => "Report Error",
            Self::Config(_) => "Configuration Error",
        }
    }

    /// Returns the bare message without the category prefix.
    ///
    /// For query errors this is the raw transport message or response body,
    /// which is what ends up in the metadata artifact.
    pub fn message(&self) -> &str {
        match self {
            Self::Load(msg)
            | Self::Query(msg)
            | Self::Persistence(msg)
            | Self::Report(msg)
            | Self::Config(msg) => msg,
        }
    }
}

/// Result type alias using BenchError.
pub type Result<T> = std::result::Result<T, BenchError>;
