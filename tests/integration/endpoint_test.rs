//! HTTP endpoint integration tests.
//!
//! Exercises the request shape and failure handling of `HttpEndpoint`.

use super::stub::{StubEndpoint, StubResponse};
use serde_json::json;
use sparql_bench::endpoint::{
    EndpointConfig, HttpEndpoint, QueryEndpoint, ACCEPT_RESULTS_JSON, CONTENT_TYPE_SPARQL_QUERY,
};
use sparql_bench::error::BenchError;
use std::time::Duration;

#[tokio::test]
async fn test_posts_raw_query_with_sparql_headers() {
    let stub = StubEndpoint::spawn(vec![StubResponse::ok(
        r#"{"head":{"vars":["x"]},"results":{"bindings":[{"x":"1"}]}}"#,
    )])
    .await;
    let endpoint = HttpEndpoint::new(EndpointConfig::new(&stub.uri)).unwrap();

    let query = "SELECT ?x WHERE {\n  ?x ?p ?o\n}";
    let value = endpoint.execute(query).await.unwrap();
    assert_eq!(value["results"]["bindings"], json!([{"x": "1"}]));

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/sparql");
    assert_eq!(request.header("content-type"), Some(CONTENT_TYPE_SPARQL_QUERY));
    assert_eq!(request.header("accept"), Some(ACCEPT_RESULTS_JSON));
    assert_eq!(request.body, query);
}

#[tokio::test]
async fn test_unparseable_body_becomes_error_message() {
    let stub = StubEndpoint::spawn(vec![StubResponse::ok(
        "\nLexical error at line 1, column 8\n",
    )])
    .await;
    let endpoint = HttpEndpoint::new(EndpointConfig::new(&stub.uri)).unwrap();

    let err = endpoint.execute("SELEC ?x").await.unwrap_err();
    assert!(matches!(err, BenchError::Query(_)));
    assert_eq!(err.message(), "Lexical error at line 1, column 8");
}

#[tokio::test]
async fn test_error_status_is_a_failure() {
    let stub = StubEndpoint::spawn(vec![StubResponse::status(400, "Bad Request")]).await;
    let endpoint = HttpEndpoint::new(EndpointConfig::new(&stub.uri)).unwrap();

    let err = endpoint.execute("SELECT * {}").await.unwrap_err();
    assert!(matches!(err, BenchError::Query(_)));
    assert!(err.message().contains("400"));
}

#[tokio::test]
async fn test_dropped_connection_is_a_failure() {
    let stub = StubEndpoint::spawn(vec![StubResponse::Drop]).await;
    let endpoint = HttpEndpoint::new(EndpointConfig::new(&stub.uri)).unwrap();

    let err = endpoint.execute("SELECT * {}").await.unwrap_err();
    assert!(matches!(err, BenchError::Query(_)));
    assert!(
        err.message().contains("closed"),
        "unexpected message: {}",
        err.message()
    );
}

#[tokio::test]
async fn test_single_attempt_per_query() {
    let stub = StubEndpoint::spawn(vec![StubResponse::Drop, StubResponse::ok("{}")]).await;
    let endpoint = HttpEndpoint::new(EndpointConfig::new(&stub.uri)).unwrap();

    assert!(endpoint.execute("SELECT 1 {}").await.is_err());
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn test_slow_query_succeeds_without_timeout() {
    let stub = StubEndpoint::spawn(vec![StubResponse::Delay(Duration::from_millis(500))]).await;
    let endpoint = HttpEndpoint::new(EndpointConfig::new(&stub.uri)).unwrap();

    assert!(endpoint.execute("SELECT * {}").await.is_ok());
}

#[tokio::test]
async fn test_opt_in_timeout() {
    let stub = StubEndpoint::spawn(vec![StubResponse::Delay(Duration::from_secs(5))]).await;
    let config = EndpointConfig::new(&stub.uri).with_timeout(Duration::from_millis(100));
    let endpoint = HttpEndpoint::new(config).unwrap();

    let err = endpoint.execute("SELECT * {}").await.unwrap_err();
    assert!(matches!(err, BenchError::Query(_)));
    assert!(
        err.message().starts_with("Request timed out"),
        "unexpected message: {}",
        err.message()
    );
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}/sparql", listener.local_addr().unwrap());
    drop(listener);

    let endpoint = HttpEndpoint::new(EndpointConfig::new(uri.clone())).unwrap();
    let err = endpoint.execute("SELECT * {}").await.unwrap_err();
    assert!(matches!(err, BenchError::Query(_)));

    let message = err.message();
    assert!(message.starts_with("Failed to connect"), "unexpected message: {message}");
    assert!(message.contains(&uri), "unexpected message: {message}");
    assert!(
        message.to_lowercase().contains("refused"),
        "unexpected message: {message}"
    );
}
