//! sparql-bench - A small benchmark harness for SPARQL endpoints.
//!
//! Loads SolidBench query templates, runs every query against an endpoint
//! one at a time, and keeps a run record per query for later reporting.

pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod recorder;
pub mod repair;
pub mod summary;
pub mod template;
