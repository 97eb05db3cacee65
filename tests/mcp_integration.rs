//! Tool dispatch through the MCP server against a scripted backend.

mod common;

use common::builders::{analysis_reply, fenced, plan_reply, review_reply, write_small_project};
use common::{body, is_error, Reply, ScriptedGenerator, TestHarness};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_review_code_returns_review_payload() {
    let harness = TestHarness::new(ScriptedGenerator::always(review_reply().to_string()));

    let result = harness
        .call(
            "review_code",
            json!({"code": "x = 1", "language": "python", "focus_areas": ["naming"]}),
        )
        .await;

    assert!(!is_error(&result));
    let payload = body(&result);
    assert!(!payload["summary"].as_str().unwrap().is_empty());
    let quality = payload["overall_quality"].as_str().unwrap();
    assert!(["excellent", "good", "fair", "needs-improvement"].contains(&quality));
    assert_eq!(payload["issues"][0]["type"], "style");
    assert_eq!(harness.generator.calls(), 1);

    let request = &harness.generator.requests()[0];
    assert!(request.prompt.contains("```python\nx = 1\n```"));
    assert!(request.prompt.contains("- naming"));
}

#[tokio::test]
async fn test_unknown_tool_yields_failure_envelope() {
    let harness = TestHarness::new(ScriptedGenerator::always("{}"));

    let result = harness.call("does_not_exist", json!({"x": 1})).await;

    assert!(is_error(&result));
    let failure = body(&result);
    assert_eq!(failure["tool"], "does_not_exist");
    assert_eq!(failure["arguments"], json!({"x": 1}));
    assert_eq!(failure["error_code"], "UNKNOWN_TOOL");
    assert!(failure["error"].as_str().unwrap().contains("does_not_exist"));
    assert_eq!(harness.generator.calls(), 0);
}

#[tokio::test]
async fn test_missing_required_argument_is_invalid_params() {
    let harness = TestHarness::new(ScriptedGenerator::always(review_reply().to_string()));

    let result = harness.call("review_code", json!({"code": "x = 1"})).await;

    assert!(is_error(&result));
    let failure = body(&result);
    assert_eq!(failure["error_code"], "INVALID_PARAMS");
    assert_eq!(failure["tool"], "review_code");
    assert_eq!(failure["arguments"], json!({"code": "x = 1"}));
    assert_eq!(harness.generator.calls(), 0);
}

#[tokio::test]
async fn test_missing_arguments_object_is_invalid_params() {
    let harness = TestHarness::new(ScriptedGenerator::always(plan_reply().to_string()));

    let result = harness.call("plan_project", serde_json::Value::Null).await;

    assert!(is_error(&result));
    let failure = body(&result);
    assert_eq!(failure["error_code"], "INVALID_PARAMS");
    assert_eq!(failure["arguments"], json!({}));
}

#[tokio::test]
async fn test_plan_project_accepts_fenced_reply() {
    let harness = TestHarness::new(ScriptedGenerator::always(fenced(&plan_reply())));

    let result = harness
        .call(
            "plan_project",
            json!({
                "description": "A todo REST API",
                "requirements": ["CRUD endpoints"],
                "tech_stack": ["Rust"]
            }),
        )
        .await;

    assert!(!is_error(&result));
    let plan = body(&result);
    assert_eq!(plan["project_name"], "Todo API");
    assert_eq!(plan["phases"][0]["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(plan["phases"][0]["tasks"][1]["dependencies"], json!(["T1"]));
    assert_eq!(harness.generator.calls(), 1);

    let request = &harness.generator.requests()[0];
    assert!(request.prompt.contains("A todo REST API"));
    assert!(request.prompt.contains("CRUD endpoints"));
}

#[tokio::test]
async fn test_refine_plan_sends_current_plan_and_feedback() {
    let harness = TestHarness::new(ScriptedGenerator::always(plan_reply().to_string()));

    let result = harness
        .call(
            "refine_plan",
            json!({"current_plan": plan_reply(), "feedback": "Add an auth phase"}),
        )
        .await;

    assert!(!is_error(&result));
    let request = &harness.generator.requests()[0];
    assert!(request.prompt.contains("Add an auth phase"));
    assert!(request.prompt.contains("Todo API"));
}

#[tokio::test]
async fn test_analyze_execution_defaults_language() {
    let harness = TestHarness::new(ScriptedGenerator::always(analysis_reply().to_string()));

    let result = harness
        .call(
            "analyze_execution",
            json!({
                "code": "def mean(xs): return sum(xs) / len(xs)",
                "execution_output": "",
                "error_messages": ["ZeroDivisionError: division by zero"]
            }),
        )
        .await;

    assert!(!is_error(&result));
    let analysis = body(&result);
    assert_eq!(analysis["success"], false);
    assert_eq!(analysis["suggested_fixes"][0]["confidence"], "high");

    let request = &harness.generator.requests()[0];
    assert!(request.prompt.contains("python"));
    assert!(request.prompt.contains("ZeroDivisionError"));
}

#[tokio::test]
async fn test_debug_error_returns_analysis() {
    let harness = TestHarness::new(ScriptedGenerator::always(analysis_reply().to_string()));

    let result = harness
        .call(
            "debug_error",
            json!({
                "code": "mean([])",
                "error_message": "ZeroDivisionError",
                "stack_trace": "File \"a.py\", line 1"
            }),
        )
        .await;

    assert!(!is_error(&result));
    assert_eq!(body(&result)["next_steps"][0], "Add a test for empty input");
    let request = &harness.generator.requests()[0];
    assert!(request.prompt.contains("line 1"));
}

#[tokio::test]
async fn test_review_directory_overlays_metadata() {
    let harness = TestHarness::new(ScriptedGenerator::always(review_reply().to_string()));
    write_small_project(harness.temp_path());
    let dir = harness.temp_path().to_string_lossy().to_string();

    let result = harness
        .call(
            "review_directory",
            json!({"directory_path": dir, "exclude_patterns": ["*.lock"]}),
        )
        .await;

    assert!(!is_error(&result));
    let review = body(&result);
    assert_eq!(review["review_type"], "directory_review");
    assert_eq!(review["directory_path"], dir);
    assert_eq!(review["include_patterns"], json!(["*"]));
    assert_eq!(review["exclude_patterns"], json!(["*.lock"]));
    assert_eq!(review["overall_quality"], "good");

    let request = &harness.generator.requests()[0];
    assert!(request.prompt.contains("mixed"));
    assert!(request.prompt.contains("print(1)"));
    assert!(!request.prompt.contains("[core]"));
}

#[tokio::test]
async fn test_review_directory_null_patterns_take_defaults() {
    let harness = TestHarness::new(ScriptedGenerator::always(review_reply().to_string()));
    write_small_project(harness.temp_path());
    let dir = harness.temp_path().to_string_lossy().to_string();

    let result = harness
        .call(
            "review_directory",
            json!({
                "directory_path": dir,
                "focus_areas": null,
                "include_patterns": null,
                "exclude_patterns": null
            }),
        )
        .await;

    assert!(!is_error(&result));
    let review = body(&result);
    assert_eq!(review["include_patterns"], json!(["*"]));
    assert_eq!(review["exclude_patterns"], json!([]));
}

#[tokio::test]
async fn test_review_code_null_lists_in_reply_are_accepted() {
    let mut reply = review_reply();
    reply["issues"] = serde_json::Value::Null;
    reply["strengths"] = serde_json::Value::Null;
    let harness = TestHarness::new(ScriptedGenerator::always(reply.to_string()));

    let result = harness
        .call("review_code", json!({"code": "x = 1", "language": "python"}))
        .await;

    assert!(!is_error(&result));
    let review = body(&result);
    assert_eq!(review["issues"], json!([]));
    assert_eq!(review["strengths"], json!([]));
    assert_eq!(harness.generator.calls(), 1);
}

#[tokio::test]
async fn test_review_directory_missing_path_is_resource_not_found() {
    let harness = TestHarness::new(ScriptedGenerator::always(review_reply().to_string()));
    let missing = harness.temp_path().join("nope").to_string_lossy().to_string();

    let result = harness
        .call("review_directory", json!({"directory_path": missing}))
        .await;

    assert!(is_error(&result));
    let failure = body(&result);
    assert_eq!(failure["error_code"], "RESOURCE_NOT_FOUND");
    assert!(failure["error"].as_str().unwrap().contains("nope"));
    assert_eq!(harness.generator.calls(), 0);
}

#[tokio::test]
async fn test_backend_failure_is_not_retried() {
    let harness = TestHarness::new(ScriptedGenerator::new(vec![Reply::Fail(
        "quota exceeded".into(),
    )]));

    let result = harness
        .call("review_code", json!({"code": "x = 1", "language": "python"}))
        .await;

    assert!(is_error(&result));
    let failure = body(&result);
    assert_eq!(failure["error_code"], "BACKEND_FAILURE");
    assert!(failure["error"].as_str().unwrap().contains("quota exceeded"));
    assert_eq!(harness.generator.calls(), 1);
}

#[tokio::test]
async fn test_invalid_output_exhausts_attempts() {
    let harness = TestHarness::new(ScriptedGenerator::always("I cannot comply."));

    let result = harness
        .call("review_code", json!({"code": "x = 1", "language": "python"}))
        .await;

    assert!(is_error(&result));
    let failure = body(&result);
    assert_eq!(failure["error_code"], "GENERATION_FAILURE");
    assert!(failure["error"].as_str().unwrap().contains("3 attempt"));
    assert_eq!(harness.generator.calls(), 3);
}

#[tokio::test]
async fn test_compare_implementations_returns_prose() {
    let harness = TestHarness::new(ScriptedGenerator::always(
        "Implementation 2 is faster and clearer.",
    ));

    let result = harness
        .call(
            "compare_implementations",
            json!({
                "code_a": "sum(xs)",
                "code_b": "reduce(add, xs)",
                "language": "python",
                "comparison_criteria": ["speed", "clarity"]
            }),
        )
        .await;

    assert!(!is_error(&result));
    let comparison = body(&result);
    assert_eq!(comparison["language"], "python");
    assert_eq!(
        comparison["comparison"],
        "Implementation 2 is faster and clearer."
    );

    let request = &harness.generator.requests()[0];
    assert!(request.prompt.contains("Comparison Criteria: speed, clarity"));
    assert!(request.system_instruction.is_some());
}

#[tokio::test]
async fn test_registry_advertises_all_tools() {
    let harness = TestHarness::new(ScriptedGenerator::always("{}"));
    let names: Vec<String> = harness
        .server
        .tool_registry()
        .tools()
        .into_iter()
        .map(|t| t.name.to_string())
        .collect();

    for expected in [
        "plan_project",
        "refine_plan",
        "review_code",
        "review_directory",
        "compare_implementations",
        "analyze_execution",
        "debug_error",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }
    assert_eq!(names.len(), 7);
}
