//! SPARQL endpoint abstraction.
//!
//! Provides a trait-based interface for sending one query to an endpoint,
//! allowing the HTTP client to be swapped for in-memory mocks in tests.

mod http;
mod mock;

pub use http::{
    parse_response, EndpointConfig, HttpEndpoint, ACCEPT_RESULTS_JSON, CONTENT_TYPE_SPARQL_QUERY,
    DEFAULT_ENDPOINT,
};
pub use mock::{FailingEndpoint, MockEndpoint};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait defining the interface for query endpoints.
///
/// An implementation makes exactly one attempt per call. Any failure,
/// whether in transport or in decoding the response, is reported as
/// `BenchError::Query`.
#[async_trait]
pub trait QueryEndpoint: Send + Sync {
    /// Executes a query and returns the parsed result document.
    async fn execute(&self, query: &str) -> Result<Value>;

    /// Returns the endpoint URI for log output.
    fn uri(&self) -> &str;
}
