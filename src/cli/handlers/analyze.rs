//! Execution analysis and debug command handlers.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::handlers::{guess_language, read_input};
use crate::cli::output::{
    md_list, output_json, print_header, print_kv, print_list, print_section, print_subheader,
    print_table, OutputMode,
};
use crate::init::AppContext;
use crate::models::ExecutionAnalysis;
use crate::services::{ErrorReport, ExecutionReport};

pub async fn handle_analyze(
    ctx: &AppContext,
    code_path: &Path,
    output_path: &Path,
    expected: Option<&str>,
    error_messages: &[String],
    language: Option<&str>,
    mode: OutputMode,
) -> Result<()> {
    let code = read_input(code_path)?;
    let execution_output = read_input(output_path)?;
    let language = language
        .map(str::to_string)
        .unwrap_or_else(|| guess_language(code_path));

    let report = ExecutionReport {
        code: &code,
        execution_output: &execution_output,
        expected_behavior: expected,
        error_messages,
        language: &language,
        previous_attempts: &[],
    };
    let analysis = ctx.analyzer.analyze_execution(&report).await?;
    render(&analysis, mode);
    Ok(())
}

pub async fn handle_debug(
    ctx: &AppContext,
    code_path: &Path,
    error_message: &str,
    stack_trace_path: Option<&Path>,
    language: Option<&str>,
    context: Option<&str>,
    mode: OutputMode,
) -> Result<()> {
    let code = read_input(code_path)?;
    let stack_trace = stack_trace_path.map(read_input).transpose()?;
    let language = language
        .map(str::to_string)
        .unwrap_or_else(|| guess_language(code_path));

    let report = ErrorReport {
        code: &code,
        error_message,
        stack_trace: stack_trace.as_deref(),
        language: &language,
        context,
    };
    let analysis = ctx.analyzer.debug_error(&report).await?;
    render(&analysis, mode);
    Ok(())
}

fn render(analysis: &ExecutionAnalysis, mode: OutputMode) {
    match mode {
        OutputMode::Json => output_json(analysis),
        OutputMode::Markdown => println!("{}", analysis_markdown(analysis)),
        OutputMode::Human => print_analysis(analysis),
    }
}

fn print_analysis(analysis: &ExecutionAnalysis) {
    print_header("Execution Analysis");
    let status = if analysis.success {
        "success".green().to_string()
    } else {
        "failed".red().to_string()
    };
    print_kv("Status", &status);
    println!("\n{}", analysis.summary);

    if !analysis.issues.is_empty() {
        print_subheader("Issues");
        let rows = analysis
            .issues
            .iter()
            .map(|i| {
                vec![
                    i.issue_type.clone(),
                    i.description.clone(),
                    i.likely_cause.clone(),
                ]
            })
            .collect();
        print_table(&["Type", "Description", "Likely cause"], rows);
    }

    for fix in &analysis.suggested_fixes {
        print_section(
            &format!("Fix ({} confidence): {}", fix.confidence.as_str(), fix.description),
            &fix.code_snippet,
        );
        println!("{}", fix.explanation.dimmed());
    }

    print_list("Next steps", &analysis.next_steps);
    if let Some(notes) = &analysis.performance_notes {
        print_section("Performance", notes);
    }
}

pub fn analysis_markdown(analysis: &ExecutionAnalysis) -> String {
    let mut out = format!(
        "# Execution Analysis\n\n**Status:** {}\n\n{}\n",
        if analysis.success { "success" } else { "failed" },
        analysis.summary
    );
    if !analysis.issues.is_empty() {
        out.push_str("\n## Issues\n\n");
        for issue in &analysis.issues {
            out.push_str(&format!(
                "- **{}**: {} (likely cause: {})\n",
                issue.issue_type, issue.description, issue.likely_cause
            ));
        }
    }
    for fix in &analysis.suggested_fixes {
        out.push_str(&format!(
            "\n## Fix: {}\n\n*Confidence: {}*\n\n```\n{}\n```\n\n{}\n",
            fix.description,
            fix.confidence.as_str(),
            fix.code_snippet,
            fix.explanation
        ));
    }
    if !analysis.next_steps.is_empty() {
        out.push_str(&format!("\n## Next steps\n\n{}\n", md_list(&analysis.next_steps)));
    }
    if let Some(notes) = &analysis.performance_notes {
        out.push_str(&format!("\n## Performance\n\n{}\n", notes));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeFix, Confidence};

    #[test]
    fn test_analysis_markdown_includes_fix_snippet() {
        let analysis = ExecutionAnalysis {
            success: false,
            summary: "Division by zero".into(),
            issues: vec![],
            suggested_fixes: vec![CodeFix {
                description: "Guard the divisor".into(),
                code_snippet: "if d == 0: return 0".into(),
                explanation: "Avoids the exception".into(),
                confidence: Confidence::High,
            }],
            next_steps: vec!["Add a regression test".into()],
            performance_notes: None,
        };
        let md = analysis_markdown(&analysis);
        assert!(md.contains("**Status:** failed"));
        assert!(md.contains("## Fix: Guard the divisor\n\n*Confidence: high*"));
        assert!(md.contains("```\nif d == 0: return 0\n```"));
        assert!(md.contains("- Add a regression test"));
    }
}
