//! Mock endpoints for testing.
//!
//! Provides in-memory endpoints so the recorder can be exercised without
//! a running SPARQL server.

use super::QueryEndpoint;
use crate::error::{BenchError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

const MOCK_URI: &str = "mock://sparql";

/// A mock endpoint that returns scripted results per query text.
///
/// Queries without a scripted response get an empty result set.
#[derive(Default)]
pub struct MockEndpoint {
    responses: HashMap<String, std::result::Result<Value, String>>,
    calls: Mutex<Vec<String>>,
}

impl MockEndpoint {
    /// Creates a mock endpoint with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful result for the given query text.
    pub fn with_result(mut self, query: impl Into<String>, result: Value) -> Self {
        self.responses.insert(query.into(), Ok(result));
        self
    }

    /// Scripts a failure for the given query text.
    pub fn with_failure(mut self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses.insert(query.into(), Err(message.into()));
        self
    }

    /// Returns the queries received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl QueryEndpoint for MockEndpoint {
    async fn execute(&self, query: &str) -> Result<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.to_string());
        }

        match self.responses.get(query) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(BenchError::query(message.clone())),
            None => Ok(json!({"head": {"vars": []}, "results": {"bindings": []}})),
        }
    }

    fn uri(&self) -> &str {
        MOCK_URI
    }
}

/// An endpoint that fails every query with the same message.
pub struct FailingEndpoint {
    message: String,
}

impl FailingEndpoint {
    /// Creates an endpoint that always fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl QueryEndpoint for FailingEndpoint {
    async fn execute(&self, _query: &str) -> Result<Value> {
        Err(BenchError::query(self.message.clone()))
    }

    fn uri(&self) -> &str {
        MOCK_URI
    }
}
