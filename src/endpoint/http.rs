//! HTTP SPARQL endpoint client.
//!
//! Sends the query text as the raw POST body (SPARQL 1.1 Protocol,
//! "query via POST directly") and parses the SPARQL JSON results.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::QueryEndpoint;
use crate::error::{BenchError, Result};

/// Default SPARQL endpoint URI.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3030/sparql";

/// Media type of the request body.
pub const CONTENT_TYPE_SPARQL_QUERY: &str = "application/sparql-query";

/// Media type requested for the response.
pub const ACCEPT_RESULTS_JSON: &str = "application/sparql-results+json";

/// Endpoint client configuration.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Endpoint URI queries are posted to.
    pub uri: String,
    /// Optional request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl EndpointConfig {
    /// Creates a new config for the given URI with no timeout.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            timeout: None,
        }
    }

    /// Sets a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// SPARQL endpoint reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    config: EndpointConfig,
    client: Client,
}

impl HttpEndpoint {
    /// Creates a new endpoint client with the given configuration.
    pub fn new(config: EndpointConfig) -> Result<Self> {
        Url::parse(&config.uri).map_err(|e| {
            BenchError::config(format!("Invalid endpoint URI '{}': {e}", config.uri))
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BenchError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl QueryEndpoint for HttpEndpoint {
    async fn execute(&self, query: &str) -> Result<Value> {
        let response = self
            .client
            .post(&self.config.uri)
            .header(CONTENT_TYPE, CONTENT_TYPE_SPARQL_QUERY)
            .header(ACCEPT, ACCEPT_RESULTS_JSON)
            .body(query.to_string())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(transport_error)?;

        let body = response.text().await.map_err(transport_error)?;

        parse_response(&body)
    }

    fn uri(&self) -> &str {
        &self.config.uri
    }
}

/// Maps a reqwest failure to a query error that keeps the underlying cause.
///
/// `reqwest::Error` only displays its outermost layer ("error sending request
/// for url ..."), so the source chain is appended to surface the real cause
/// such as a refused connection or an elapsed timeout.
fn transport_error(err: reqwest::Error) -> BenchError {
    let kind = if err.is_timeout() {
        "Request timed out"
    } else if err.is_connect() {
        "Failed to connect"
    } else {
        "Request failed"
    };
    BenchError::query(format!("{kind}: {}", error_chain(&err)))
}

/// Joins an error and all of its sources with `": "`.
///
/// Sources whose text already appears in the message are skipped, since some
/// error types embed their source in their own `Display`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Parses a response body as JSON.
///
/// An unparseable body is returned verbatim (trimmed) as the error message,
/// so endpoint error pages stay readable in the run record.
pub fn parse_response(body: &str) -> Result<Value> {
    let text = body.trim();
    serde_json::from_str(text).map_err(|_| BenchError::query(text))
}
