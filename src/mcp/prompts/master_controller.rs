//! Master controller workflow prompt.
//!
//! Seeds an orchestrating assistant with the plan / implement / review loop
//! built on this server's tools.

use rmcp::model::{GetPromptResult, PromptArgument, PromptMessage, PromptMessageRole};
use serde_json::{Map, Value};

use crate::services::prompts::MASTER_CONTROLLER_PROMPT;

pub const MASTER_CONTROLLER_NAME: &str = "master_controller";

pub fn master_controller_arguments() -> Vec<PromptArgument> {
    vec![PromptArgument {
        name: "project_description".into(),
        title: None,
        description: Some("What the project should build".into()),
        required: Some(false),
    }]
}

pub fn get_master_controller_prompt(args: Option<Map<String, Value>>) -> GetPromptResult {
    let project = args
        .as_ref()
        .and_then(|a| a.get("project_description"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty());

    let kickoff = match project {
        Some(description) => format!(
            "Let's start a new project:\n\n{}\n\n\
             Begin by calling `plan_project`, then issue the first [TASK].",
            description
        ),
        None => "Let's start a new project. Ask me for the project description, \
                 then call `plan_project` and issue the first [TASK]."
            .to_string(),
    };

    GetPromptResult {
        description: Some(
            "Orchestrate a project: plan, assign tasks, review code and execution results"
                .to_string(),
        ),
        messages: vec![
            PromptMessage::new_text(PromptMessageRole::Assistant, MASTER_CONTROLLER_PROMPT),
            PromptMessage::new_text(
                PromptMessageRole::Assistant,
                "Workflow:\n\n\
                 1. **Plan** with `plan_project`; adjust with `refine_plan`\n\
                 2. **Assign** one task at a time with [TASK]\n\
                 3. **Review** submitted code with `review_code` or `review_directory`\n\
                 4. **Analyze** run output with `analyze_execution` or `debug_error`\n\
                 5. **Approve** with [APPROVED] or send back with [IMPROVE]"
                    .to_string(),
            ),
            PromptMessage::new_text(PromptMessageRole::User, kickoff),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(result: &GetPromptResult) -> Vec<String> {
        let json = serde_json::to_value(result).unwrap();
        json["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"]["text"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_includes_project_description() {
        let mut args = Map::new();
        args.insert("project_description".into(), Value::from("A URL shortener"));
        let result = get_master_controller_prompt(Some(args));
        let texts = texts(&result);
        assert_eq!(texts.len(), 3);
        assert!(texts[0].contains("Master Controller"));
        assert!(texts[2].contains("A URL shortener"));
    }

    #[test]
    fn test_without_description_asks_for_one() {
        let result = get_master_controller_prompt(None);
        assert!(texts(&result)[2].contains("Ask me for the project description"));
    }
}
