//! `file://` resource reads through the server.

mod common;

use std::fs;

use common::builders::write_small_project;
use common::{ScriptedGenerator, TestHarness};
use plan_mcp::PlanMcpError;

fn harness() -> TestHarness {
    TestHarness::new(ScriptedGenerator::always("{}"))
}

#[tokio::test]
async fn test_directory_resource_aggregates_visible_sources() {
    let harness = harness();
    write_small_project(harness.temp_path());
    let uri = format!("file://{}", harness.temp_path().display());

    let text = harness.server.read_uri(&uri).await.unwrap();

    assert!(text.contains("a.py"));
    assert!(text.contains("print(1)"));
    assert!(text.contains("Code Files Content:"));
    assert!(!text.contains(".git"));
}

#[tokio::test]
async fn test_file_resource_returns_content_with_header() {
    let harness = harness();
    let path = harness.temp_path().join("notes.md");
    fs::write(&path, "# Notes\nhello").unwrap();
    let uri = format!("file://{}", path.display());

    let text = harness.server.read_uri(&uri).await.unwrap();

    assert!(text.starts_with("File: "));
    assert!(text.ends_with("# Notes\nhello"));
}

#[tokio::test]
async fn test_missing_path_is_resource_not_found() {
    let harness = harness();
    let missing = harness.temp_path().join("missing.py");
    let uri = format!("file://{}", missing.display());

    let err = harness.server.read_uri(&uri).await.unwrap_err();

    match err {
        PlanMcpError::ResourceNotFound { path } => {
            assert!(path.contains("missing.py"));
        }
        other => panic!("expected ResourceNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_scheme_is_resource_not_found() {
    let harness = harness();

    let err = harness
        .server
        .read_uri("https://example.com/a.py")
        .await
        .unwrap_err();

    assert!(matches!(err, PlanMcpError::ResourceNotFound { .. }));
    assert_eq!(err.code(), "RESOURCE_NOT_FOUND");
}
