//! Prompt composition.

/// An immutable prompt: system instruction, user content and an optional
/// schema instruction appended to the system side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    system: Option<String>,
    user: String,
    schema_instruction: Option<String>,
}

impl Prompt {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
            schema_instruction: None,
        }
    }

    pub fn with_system(mut self, system: Option<&str>) -> Self {
        self.system = system.map(str::to_string);
        self
    }

    /// Attach the instruction that asks for a raw JSON payload conforming to
    /// `schema_json`.
    pub fn with_schema(mut self, schema_json: &str) -> Self {
        self.schema_instruction = Some(format!(
            "You must respond with valid JSON that conforms to this schema:\n{}\n\n\
             Important: Return ONLY the JSON object, no markdown formatting, no code fences, no explanations.",
            schema_json
        ));
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// The system instruction sent to the backend: the base instruction
    /// followed by the schema instruction, blank-line separated.
    pub fn system_instruction(&self) -> Option<String> {
        let parts: Vec<&str> = [self.system.as_deref(), self.schema_instruction.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }
}
