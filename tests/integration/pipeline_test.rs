//! End-to-end pipeline tests.
//!
//! Loads templates from disk, runs them against the stub endpoint and
//! checks the persisted run records and summary.

use super::stub::{StubEndpoint, StubResponse};
use pretty_assertions::assert_eq;
use sparql_bench::endpoint::{EndpointConfig, HttpEndpoint, MockEndpoint};
use sparql_bench::recorder::{metadata_path, query_path, read_metadata, result_path, RunRecorder};
use sparql_bench::summary;
use sparql_bench::template::load_templates;
use std::fs;
use tempfile::tempdir;

const FIRST_QUERY: &str = "SELECT ?x WHERE { ?x a <http://example.org/Person> }";
const SECOND_QUERY: &str = "SELECT ?y WHERE { ?y a <http://example.org/Post> }";

#[tokio::test]
async fn test_interactive_complex_end_to_end() {
    let queries = tempdir().unwrap();
    let results = tempdir().unwrap();
    fs::write(
        queries.path().join("interactive-complex.sparql"),
        format!("{FIRST_QUERY}\n\n{SECOND_QUERY}\n\n"),
    )
    .unwrap();

    let units = load_templates(queries.path()).unwrap();
    let ids: Vec<_> = units.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["interactive-complex-1", "interactive-complex-2"]);

    let stub = StubEndpoint::spawn(vec![
        StubResponse::ok(r#"{"results":{"bindings":[{"x":"1"}]}}"#),
        StubResponse::Drop,
    ])
    .await;
    let endpoint = HttpEndpoint::new(EndpointConfig::new(&stub.uri)).unwrap();

    let run = RunRecorder::new(&endpoint, results.path())
        .run(&units)
        .await
        .unwrap();
    assert_eq!(run.total, 2);
    assert_eq!(run.succeeded, 1);
    assert_eq!(run.failed, 1);

    let first = read_metadata(&metadata_path(results.path(), "interactive-complex-1")).unwrap();
    assert!(first.success);
    assert_eq!(first.results, 1);
    assert_eq!(first.error, None);

    let second = read_metadata(&metadata_path(results.path(), "interactive-complex-2")).unwrap();
    assert!(!second.success);
    assert_eq!(second.results, 0);
    let error = second.error.unwrap_or_default();
    assert!(error.contains("closed"), "unexpected error: {error}");

    assert_eq!(
        fs::read_to_string(query_path(results.path(), "interactive-complex-1")).unwrap(),
        format!("{FIRST_QUERY}\n")
    );
    assert_eq!(
        fs::read_to_string(result_path(results.path(), "interactive-complex-2")).unwrap(),
        "{}\n"
    );

    let rows = summary::collect_rows(results.path()).unwrap();
    let row_ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(row_ids, vec!["interactive-complex-1", "interactive-complex-2"]);

    let markdown = summary::render_summary(results.path()).unwrap();
    let lines: Vec<_> = markdown.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("| interactive-complex-1 | yes | 1 | "));
    assert!(lines[3].starts_with("| interactive-complex-2 | no | 0 | "));
}

#[tokio::test]
async fn test_rerun_overwrites_records() {
    let queries = tempdir().unwrap();
    let results = tempdir().unwrap();
    fs::write(
        queries.path().join("interactive-short.sparql"),
        format!("{FIRST_QUERY}\n\n{SECOND_QUERY}"),
    )
    .unwrap();
    let units = load_templates(queries.path()).unwrap();

    let endpoint = MockEndpoint::new()
        .with_result(FIRST_QUERY, serde_json::json!({"results": {"bindings": [{"x": "1"}]}}));
    let recorder = RunRecorder::new(&endpoint, results.path());

    recorder.run(&units).await.unwrap();
    let first_pass: Vec<_> = units
        .iter()
        .map(|u| {
            (
                fs::read_to_string(query_path(results.path(), &u.id)).unwrap(),
                fs::read_to_string(result_path(results.path(), &u.id)).unwrap(),
            )
        })
        .collect();

    recorder.run(&units).await.unwrap();
    let second_pass: Vec<_> = units
        .iter()
        .map(|u| {
            (
                fs::read_to_string(query_path(results.path(), &u.id)).unwrap(),
                fs::read_to_string(result_path(results.path(), &u.id)).unwrap(),
            )
        })
        .collect();

    assert_eq!(first_pass, second_pass);
    // Three artifacts per unit, nothing appended or duplicated
    assert_eq!(fs::read_dir(results.path()).unwrap().count(), 6);
}
