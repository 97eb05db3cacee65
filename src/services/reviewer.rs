//! Code review on top of structured generation.

use tracing::{error, info};

use crate::generation::{GenerationError, StructuredGenerator};
use crate::models::{CodeReview, Comparison};
use crate::services::prompts::{bullets, CODE_REVIEWER_PROMPT};

#[derive(Debug, Clone, Default)]
pub struct ReviewRequest<'a> {
    pub code: &'a str,
    pub language: &'a str,
    pub context: Option<&'a str>,
    pub focus_areas: &'a [String],
    /// Feedback from an earlier review when this is a revision.
    pub previous_feedback: Option<&'a str>,
}

#[derive(Clone)]
pub struct CodeReviewer {
    engine: StructuredGenerator,
}

impl CodeReviewer {
    pub fn new(engine: StructuredGenerator) -> Self {
        Self { engine }
    }

    pub async fn review_code(
        &self,
        request: &ReviewRequest<'_>,
    ) -> Result<CodeReview, GenerationError> {
        info!(
            "Reviewing {} code ({} characters)",
            request.language,
            request.code.chars().count()
        );
        let prompt = build_review_prompt(request);

        let review: CodeReview = self
            .engine
            .generate(&prompt, Some(CODE_REVIEWER_PROMPT))
            .await
            .inspect_err(|e| error!("Failed to review code: {}", e))?;

        info!(
            "Code review completed: {}, {} issues, {} suggestions",
            review.overall_quality.as_str(),
            review.issues.len(),
            review.suggestions.len()
        );
        Ok(review)
    }

    /// Free-text comparison of two implementations.
    pub async fn compare_implementations(
        &self,
        code_a: &str,
        code_b: &str,
        language: &str,
        criteria: &[String],
    ) -> Result<Comparison, GenerationError> {
        info!("Comparing two {} implementations", language);
        let prompt = build_compare_prompt(code_a, code_b, language, criteria);

        let comparison = self
            .engine
            .generate_text(
                &prompt,
                Some(CODE_REVIEWER_PROMPT),
                self.engine.defaults().temperature,
            )
            .await
            .inspect_err(|e| error!("Failed to compare implementations: {}", e))?;

        info!("Code comparison completed");
        Ok(Comparison {
            language: language.to_string(),
            comparison,
        })
    }
}

pub fn build_review_prompt(request: &ReviewRequest<'_>) -> String {
    let mut parts = vec![format!(
        "Please review the following {} code:",
        request.language
    )];
    if let Some(context) = request.context {
        parts.push(format!("Context: {}", context));
    }
    parts.push(format!("```{}", request.language));
    parts.push(request.code.to_string());
    parts.push("```".to_string());

    if !request.focus_areas.is_empty() {
        parts.push(format!("\nFocus Areas:\n{}", bullets(request.focus_areas)));
    }
    if let Some(feedback) = request.previous_feedback {
        parts.push(format!(
            "\nThis is a revision. Previous feedback:\n{}",
            feedback
        ));
    }
    parts.join("\n")
}

fn build_compare_prompt(code_a: &str, code_b: &str, language: &str, criteria: &[String]) -> String {
    let criteria = if criteria.is_empty() {
        String::new()
    } else {
        format!("Comparison Criteria: {}\n\n", criteria.join(", "))
    };
    format!(
        "Compare these two {lang} implementations:\n\n\
         Implementation 1:\n```{lang}\n{a}\n```\n\n\
         Implementation 2:\n```{lang}\n{b}\n```\n\n\
         {criteria}\
         Please provide a detailed comparison covering:\n\
         1. Functionality differences\n\
         2. Performance implications\n\
         3. Code quality and readability\n\
         4. Best practices adherence\n\
         5. Recommendation on which to use and why",
        lang = language,
        a = code_a,
        b = code_b,
        criteria = criteria,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_prompt_layout() {
        let focus = vec!["security".to_string()];
        let prompt = build_review_prompt(&ReviewRequest {
            code: "x = 1",
            language: "python",
            context: Some("config loader"),
            focus_areas: &focus,
            previous_feedback: None,
        });
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines[0], "Please review the following python code:");
        assert_eq!(lines[1], "Context: config loader");
        assert_eq!(lines[2], "```python");
        assert_eq!(lines[3], "x = 1");
        assert_eq!(lines[4], "```");
        assert!(prompt.contains("Focus Areas:\n- security"));
        assert!(!prompt.contains("revision"));
    }

    #[test]
    fn test_review_prompt_revision() {
        let prompt = build_review_prompt(&ReviewRequest {
            code: "x",
            language: "rust",
            previous_feedback: Some("rename x"),
            ..Default::default()
        });
        assert!(prompt.contains("This is a revision. Previous feedback:\nrename x"));
    }

    #[test]
    fn test_compare_prompt_criteria() {
        let prompt = build_compare_prompt("a()", "b()", "go", &["speed".to_string()]);
        assert!(prompt.contains("Implementation 1:\n```go\na()\n```"));
        assert!(prompt.contains("Comparison Criteria: speed"));
        let prompt = build_compare_prompt("a()", "b()", "go", &[]);
        assert!(!prompt.contains("Comparison Criteria"));
    }
}
