//! Review, directory review, and comparison command handlers.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::handlers::{guess_language, read_input};
use crate::cli::output::{
    md_list, output_json, print_header, print_kv, print_list, print_section, print_subheader,
    print_table, OutputMode,
};
use crate::init::AppContext;
use crate::mcp::{PlanServer, ReviewDirectoryInput};
use crate::models::{CodeReview, Severity};
use crate::services::ReviewRequest;

pub async fn handle_review(
    ctx: &AppContext,
    file: &Path,
    language: Option<&str>,
    context: Option<&str>,
    focus_areas: &[String],
    mode: OutputMode,
) -> Result<()> {
    let code = read_input(file)?;
    let language = language
        .map(str::to_string)
        .unwrap_or_else(|| guess_language(file));
    let request = ReviewRequest {
        code: &code,
        language: &language,
        context,
        focus_areas,
        previous_feedback: None,
    };
    let review = ctx.reviewer.review_code(&request).await?;

    match mode {
        OutputMode::Json => output_json(&review),
        OutputMode::Markdown => println!("{}", review_markdown(&review)),
        OutputMode::Human => print_review(&review),
    }
    Ok(())
}

/// Runs through the same handler as the `review_directory` tool.
pub async fn handle_review_dir(
    ctx: &AppContext,
    path: &Path,
    focus_areas: &[String],
    include_patterns: &[String],
    exclude_patterns: &[String],
    mode: OutputMode,
) -> Result<()> {
    let server = PlanServer::from_context(ctx);
    let input = ReviewDirectoryInput {
        directory_path: path.display().to_string(),
        focus_areas: focus_areas.to_vec(),
        include_patterns: if include_patterns.is_empty() {
            vec!["*".to_string()]
        } else {
            include_patterns.to_vec()
        },
        exclude_patterns: exclude_patterns.to_vec(),
    };
    let result = server.handle_review_directory(input).await?;

    match mode {
        OutputMode::Json => output_json(&result),
        OutputMode::Markdown => println!(
            "Directory: `{}`\n\n{}",
            result.directory_path,
            review_markdown(&result.review)
        ),
        OutputMode::Human => {
            print_kv("Directory", &result.directory_path);
            print_review(&result.review);
        }
    }
    Ok(())
}

pub async fn handle_compare(
    ctx: &AppContext,
    a: &Path,
    b: &Path,
    language: Option<&str>,
    criteria: &[String],
    mode: OutputMode,
) -> Result<()> {
    let code_a = read_input(a)?;
    let code_b = read_input(b)?;
    let language = language
        .map(str::to_string)
        .unwrap_or_else(|| guess_language(a));
    let comparison = ctx
        .reviewer
        .compare_implementations(&code_a, &code_b, &language, criteria)
        .await?;

    match mode {
        OutputMode::Json => output_json(&comparison),
        OutputMode::Markdown => println!("{}", comparison.comparison),
        OutputMode::Human => print_section(
            &format!("{} vs {}", a.display(), b.display()),
            &comparison.comparison,
        ),
    }
    Ok(())
}

fn severity_label(severity: Severity) -> String {
    let label = severity.as_str();
    match severity {
        Severity::Critical => label.red().bold().to_string(),
        Severity::Major => label.red().to_string(),
        Severity::Minor => label.yellow().to_string(),
        Severity::Info => label.dimmed().to_string(),
    }
}

fn print_review(review: &CodeReview) {
    print_header("Code Review");
    print_kv("Overall quality", review.overall_quality.as_str());
    println!("\n{}", review.summary);

    if !review.issues.is_empty() {
        print_subheader("Issues");
        let rows = review
            .issues
            .iter()
            .map(|i| {
                vec![
                    severity_label(i.severity),
                    i.issue_type.clone(),
                    i.line_number.map(|n| n.to_string()).unwrap_or_default(),
                    i.message.clone(),
                ]
            })
            .collect();
        print_table(&["Severity", "Type", "Line", "Message"], rows);
    }

    if !review.suggestions.is_empty() {
        print_subheader("Suggestions");
        let rows = review
            .suggestions
            .iter()
            .map(|s| {
                vec![
                    s.suggestion_type.as_str().to_string(),
                    s.impact.as_str().to_string(),
                    s.message.clone(),
                ]
            })
            .collect();
        print_table(&["Type", "Impact", "Suggestion"], rows);
    }

    print_list("Strengths", &review.strengths);
    if let Some(coverage) = &review.test_coverage_assessment {
        print_section("Test coverage", coverage);
    }
}

pub fn review_markdown(review: &CodeReview) -> String {
    let mut out = format!(
        "# Code Review\n\n**Overall quality:** {}\n\n{}\n",
        review.overall_quality.as_str(),
        review.summary
    );
    if !review.issues.is_empty() {
        out.push_str("\n## Issues\n\n");
        for issue in &review.issues {
            let line = issue
                .line_number
                .map(|n| format!(" (line {})", n))
                .unwrap_or_default();
            out.push_str(&format!(
                "- **{}** [{}]{}: {}\n",
                issue.severity.as_str(),
                issue.issue_type,
                line,
                issue.message
            ));
            if let Some(fix) = &issue.suggestion {
                out.push_str(&format!("  - Fix: {}\n", fix));
            }
        }
    }
    if !review.suggestions.is_empty() {
        out.push_str("\n## Suggestions\n\n");
        for s in &review.suggestions {
            out.push_str(&format!(
                "- **{}** ({} impact): {}\n",
                s.suggestion_type.as_str(),
                s.impact.as_str(),
                s.message
            ));
            if let Some(example) = &s.example_code {
                out.push_str(&format!("\n```\n{}\n```\n", example));
            }
        }
    }
    if !review.strengths.is_empty() {
        out.push_str(&format!("\n## Strengths\n\n{}\n", md_list(&review.strengths)));
    }
    if let Some(coverage) = &review.test_coverage_assessment {
        out.push_str(&format!("\n## Test coverage\n\n{}\n", coverage));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeIssue, OverallQuality};

    #[test]
    fn test_review_markdown_lists_issues_with_lines() {
        let review = CodeReview {
            summary: "Mostly fine".into(),
            overall_quality: OverallQuality::Good,
            issues: vec![CodeIssue {
                severity: Severity::Minor,
                issue_type: "style".into(),
                message: "long line".into(),
                line_number: Some(12),
                suggestion: Some("wrap it".into()),
            }],
            suggestions: vec![],
            strengths: vec![],
            test_coverage_assessment: None,
        };
        let md = review_markdown(&review);
        assert!(md.contains("**Overall quality:** good"));
        assert!(md.contains("- **minor** [style] (line 12): long line"));
        assert!(md.contains("  - Fix: wrap it"));
        assert!(!md.contains("## Suggestions"));
    }
}
