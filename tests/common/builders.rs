//! Canned backend replies and filesystem fixtures.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

pub fn review_reply() -> Value {
    json!({
        "summary": "Small and readable; no input validation.",
        "overall_quality": "good",
        "issues": [{
            "severity": "minor",
            "type": "style",
            "message": "Single-letter variable name",
            "line_number": 1,
            "suggestion": "Use a descriptive name"
        }],
        "suggestions": [{
            "type": "readability",
            "message": "Name the constant",
            "impact": "low"
        }],
        "strengths": ["Concise"]
    })
}

pub fn plan_reply() -> Value {
    json!({
        "project_name": "Todo API",
        "overview": "REST API for todo items",
        "phases": [{
            "name": "Foundation",
            "description": "Project skeleton and persistence",
            "tasks": [
                {"id": "T1", "title": "Scaffold", "description": "Create project", "priority": "high"},
                {"id": "T2", "title": "Schema", "description": "Design tables", "priority": "medium", "dependencies": ["T1"]}
            ],
            "milestone": "API boots"
        }],
        "estimated_duration": "2 weeks",
        "key_risks": ["Scope creep"]
    })
}

pub fn analysis_reply() -> Value {
    json!({
        "success": false,
        "summary": "ZeroDivisionError on empty input",
        "issues": [{"type": "runtime", "description": "Division by zero", "likely_cause": "Empty list"}],
        "suggested_fixes": [{
            "description": "Guard empty input",
            "code_snippet": "if not xs: return 0",
            "explanation": "Avoids dividing by len([])",
            "confidence": "high"
        }],
        "next_steps": ["Add a test for empty input"]
    })
}

/// Wrap a JSON payload the way chatty models do.
pub fn fenced(value: &Value) -> String {
    format!("```json\n{}\n```", serde_json::to_string_pretty(value).unwrap())
}

/// `a.py` with `print(1)`, plus a hidden `.git/` directory.
pub fn write_small_project(root: &Path) {
    fs::write(root.join("a.py"), "print(1)").unwrap();
    fs::create_dir(root.join(".git")).unwrap();
    fs::write(root.join(".git").join("config"), "[core]").unwrap();
}
