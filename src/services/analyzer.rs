//! Execution analysis and error debugging on top of structured generation.

use tracing::{error, info};

use crate::generation::{GenerationError, StructuredGenerator};
use crate::models::ExecutionAnalysis;
use crate::services::prompts::EXECUTION_ANALYZER_PROMPT;

pub const DEFAULT_LANGUAGE: &str = "python";

#[derive(Debug, Clone, Default)]
pub struct ExecutionReport<'a> {
    pub code: &'a str,
    pub execution_output: &'a str,
    pub expected_behavior: Option<&'a str>,
    pub error_messages: &'a [String],
    pub language: &'a str,
    /// Earlier attempts when this is a retry.
    pub previous_attempts: &'a [String],
}

#[derive(Debug, Clone, Default)]
pub struct ErrorReport<'a> {
    pub code: &'a str,
    pub error_message: &'a str,
    pub stack_trace: Option<&'a str>,
    pub language: &'a str,
    pub context: Option<&'a str>,
}

#[derive(Clone)]
pub struct ExecutionAnalyzer {
    engine: StructuredGenerator,
}

impl ExecutionAnalyzer {
    pub fn new(engine: StructuredGenerator) -> Self {
        Self { engine }
    }

    pub async fn analyze_execution(
        &self,
        report: &ExecutionReport<'_>,
    ) -> Result<ExecutionAnalysis, GenerationError> {
        info!("Analyzing execution results for {} code", report.language);
        let prompt = build_analysis_prompt(report);

        let analysis: ExecutionAnalysis = self
            .engine
            .generate(&prompt, Some(EXECUTION_ANALYZER_PROMPT))
            .await
            .inspect_err(|e| error!("Failed to analyze execution: {}", e))?;

        info!(
            "Execution analysis completed: {}, {} issues, {} fixes suggested",
            if analysis.success { "Success" } else { "Failed" },
            analysis.issues.len(),
            analysis.suggested_fixes.len()
        );
        Ok(analysis)
    }

    pub async fn debug_error(
        &self,
        report: &ErrorReport<'_>,
    ) -> Result<ExecutionAnalysis, GenerationError> {
        let preview: String = report.error_message.chars().take(100).collect();
        info!("Debugging {} error: {}...", report.language, preview);
        let prompt = build_debug_prompt(report);

        let analysis: ExecutionAnalysis = self
            .engine
            .generate(&prompt, Some(EXECUTION_ANALYZER_PROMPT))
            .await
            .inspect_err(|e| error!("Failed to debug error: {}", e))?;

        info!(
            "Debug analysis completed with {} fixes",
            analysis.suggested_fixes.len()
        );
        Ok(analysis)
    }
}

pub fn build_analysis_prompt(report: &ExecutionReport<'_>) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(expected) = report.expected_behavior {
        parts.push(format!("Expected Behavior: {}\n", expected));
    }
    parts.extend([
        format!("Code ({}):", report.language),
        format!("```{}", report.language),
        report.code.to_string(),
        "```".to_string(),
        String::new(),
        "Execution Output:".to_string(),
        "```".to_string(),
        report.execution_output.to_string(),
        "```".to_string(),
    ]);

    if !report.error_messages.is_empty() {
        parts.push("\nError Messages:".to_string());
        parts.extend(report.error_messages.iter().map(|e| format!("- {}", e)));
    }

    if !report.previous_attempts.is_empty() {
        parts.push("\nPrevious Attempts:".to_string());
        for (i, attempt) in report.previous_attempts.iter().enumerate() {
            parts.push(format!("\nAttempt {}:\n{}", i + 1, attempt));
        }
    }

    parts.push("\nPlease analyze the execution results and provide guidance.".to_string());
    parts.join("\n")
}

fn build_debug_prompt(report: &ErrorReport<'_>) -> String {
    let mut parts = vec![
        format!("Debug this {} error:", report.language),
        String::new(),
        "Code:".to_string(),
        format!("```{}", report.language),
        report.code.to_string(),
        "```".to_string(),
        String::new(),
        "Error Message:".to_string(),
        report.error_message.to_string(),
    ];
    if let Some(trace) = report.stack_trace {
        parts.extend([String::new(), "Stack Trace:".to_string(), trace.to_string()]);
    }
    if let Some(context) = report.context {
        parts.extend([String::new(), format!("Context: {}", context)]);
    }
    parts.extend([
        String::new(),
        "Please provide a detailed analysis of the error and specific fixes.".to_string(),
    ]);
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_orders_sections() {
        let errors = vec!["ZeroDivisionError".to_string()];
        let attempts = vec!["wrapped in try".to_string()];
        let prompt = build_analysis_prompt(&ExecutionReport {
            code: "1/0",
            execution_output: "Traceback ...",
            expected_behavior: Some("prints 0"),
            error_messages: &errors,
            language: "python",
            previous_attempts: &attempts,
        });
        assert!(prompt.starts_with("Expected Behavior: prints 0"));
        let code_at = prompt.find("```python\n1/0\n```").unwrap();
        let output_at = prompt.find("Execution Output:\n```\nTraceback ...\n```").unwrap();
        assert!(code_at < output_at);
        assert!(prompt.contains("Error Messages:\n- ZeroDivisionError"));
        assert!(prompt.contains("Attempt 1:\nwrapped in try"));
    }

    #[test]
    fn test_debug_prompt_optional_sections() {
        let prompt = build_debug_prompt(&ErrorReport {
            code: "x",
            error_message: "boom",
            language: "rust",
            ..Default::default()
        });
        assert!(prompt.starts_with("Debug this rust error:"));
        assert!(!prompt.contains("Stack Trace:"));
        assert!(!prompt.contains("Context:"));

        let prompt = build_debug_prompt(&ErrorReport {
            code: "x",
            error_message: "boom",
            stack_trace: Some("at main"),
            language: "rust",
            context: Some("cli"),
        });
        assert!(prompt.contains("Stack Trace:\nat main"));
        assert!(prompt.contains("Context: cli"));
    }
}
