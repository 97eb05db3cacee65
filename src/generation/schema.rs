//! Schema descriptors and validation of generated payloads.
//!
//! A [`Shape`] declares what a result type must look like. [`validate`]
//! walks the shape in declaration order and reports the first violation,
//! so the same bad payload always yields the same diagnostic. Types are
//! never coerced: `"3"` is not an integer and `1` is not a string.

use std::fmt;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Declarative shape of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    String,
    Integer,
    Number,
    Boolean,
    /// A string restricted to a fixed literal set.
    Literal(&'static [&'static str]),
    Array(Box<Shape>),
    Object(Vec<Field>),
}

/// A named field of an object shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
    /// Required fields must be present and non-null. Optional fields may be
    /// absent or null.
    pub required: bool,
}

impl Field {
    pub fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            required: true,
        }
    }

    pub fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            required: false,
        }
    }
}

impl Shape {
    pub fn array(item: Shape) -> Self {
        Shape::Array(Box::new(item))
    }

    /// Human-readable type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::String => "string",
            Shape::Integer => "integer",
            Shape::Number => "number",
            Shape::Boolean => "boolean",
            Shape::Literal(_) => "string",
            Shape::Array(_) => "array",
            Shape::Object(_) => "object",
        }
    }
}

/// A result type produced by structured generation.
///
/// `shape()` is the descriptor the validator enforces; the JSON schema from
/// `JsonSchema` is what the backend is shown.
pub trait StructuredOutput: DeserializeOwned + JsonSchema {
    fn shape() -> &'static Shape;

    /// Serialized JSON schema embedded in the system instruction.
    fn schema_json() -> String {
        let schema = schemars::schema_for!(Self);
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Why a candidate payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// The text is not parseable JSON at all.
    Malformed(String),
    MissingField,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    NotAllowed {
        value: String,
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Malformed(detail) => write!(f, "malformed: {}", detail),
            ValidationReason::MissingField => write!(f, "missing required field"),
            ValidationReason::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            ValidationReason::NotAllowed { value, allowed } => {
                write!(f, "'{}' is not one of [{}]", value, allowed.join(", "))
            }
        }
    }
}

/// First structural problem found in a candidate payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct ValidationError {
    /// Field path such as `$.phases[0].tasks[2].priority`.
    pub path: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self {
            path: "$".to_string(),
            reason: ValidationReason::Malformed(detail.into()),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.reason, ValidationReason::Malformed(_))
    }
}

/// Parse `candidate` as JSON and check it against `shape`.
///
/// Returns the parsed value on success.
pub fn validate(candidate: &str, shape: &Shape) -> Result<Value, ValidationError> {
    if candidate.trim().is_empty() {
        return Err(ValidationError::malformed("empty payload"));
    }
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ValidationError::malformed(e.to_string()))?;
    check_value(&value, shape, "$")?;
    Ok(value)
}

/// Check an already-parsed value against `shape`.
pub fn check_value(value: &Value, shape: &Shape, path: &str) -> Result<(), ValidationError> {
    match shape {
        Shape::String => match value {
            Value::String(_) => Ok(()),
            other => Err(wrong_type(path, shape, other)),
        },
        Shape::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(()),
            other => Err(wrong_type(path, shape, other)),
        },
        Shape::Number => match value {
            Value::Number(_) => Ok(()),
            other => Err(wrong_type(path, shape, other)),
        },
        Shape::Boolean => match value {
            Value::Bool(_) => Ok(()),
            other => Err(wrong_type(path, shape, other)),
        },
        Shape::Literal(allowed) => match value {
            Value::String(s) if allowed.contains(&s.as_str()) => Ok(()),
            Value::String(s) => Err(ValidationError {
                path: path.to_string(),
                reason: ValidationReason::NotAllowed {
                    value: s.clone(),
                    allowed: *allowed,
                },
            }),
            other => Err(wrong_type(path, shape, other)),
        },
        Shape::Array(item) => match value {
            Value::Array(items) => {
                for (i, element) in items.iter().enumerate() {
                    check_value(element, item, &format!("{}[{}]", path, i))?;
                }
                Ok(())
            }
            other => Err(wrong_type(path, shape, other)),
        },
        Shape::Object(fields) => match value {
            Value::Object(map) => {
                for field in fields {
                    let field_path = format!("{}.{}", path, field.name);
                    match map.get(field.name) {
                        None | Some(Value::Null) if field.required => {
                            return Err(ValidationError {
                                path: field_path,
                                reason: ValidationReason::MissingField,
                            });
                        }
                        None | Some(Value::Null) => {}
                        Some(v) => check_value(v, &field.shape, &field_path)?,
                    }
                }
                Ok(())
            }
            other => Err(wrong_type(path, shape, other)),
        },
    }
}

fn wrong_type(path: &str, expected: &Shape, found: &Value) -> ValidationError {
    ValidationError {
        path: path.to_string(),
        reason: ValidationReason::WrongType {
            expected: expected.type_name(),
            found: json_type_name(found),
        },
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LEVELS: &[&str] = &["high", "medium", "low"];

    fn task_shape() -> Shape {
        Shape::Object(vec![
            Field::required("title", Shape::String),
            Field::required("priority", Shape::Literal(LEVELS)),
            Field::optional("line", Shape::Integer),
            Field::optional("tags", Shape::array(Shape::String)),
        ])
    }

    fn root_shape() -> Shape {
        Shape::Object(vec![
            Field::required("name", Shape::String),
            Field::required("done", Shape::Boolean),
            Field::required("tasks", Shape::array(task_shape())),
        ])
    }

    #[test]
    fn test_valid_payload_passes() {
        let payload = r#"{
            "name": "x",
            "done": false,
            "tasks": [{"title": "a", "priority": "high", "line": 3, "tags": ["t"]}],
            "extra": "ignored"
        }"#;
        let value = validate(payload, &root_shape()).unwrap();
        assert_eq!(value["name"], "x");
    }

    #[test]
    fn test_malformed_json() {
        let err = validate("not json", &root_shape()).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err.path, "$");
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let err = validate("   ", &root_shape()).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_missing_required_field() {
        let err = validate(r#"{"name": "x", "tasks": []}"#, &root_shape()).unwrap_err();
        assert_eq!(err.path, "$.done");
        assert_eq!(err.reason, ValidationReason::MissingField);
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let err = validate(r#"{"name": null, "done": true, "tasks": []}"#, &root_shape())
            .unwrap_err();
        assert_eq!(err.path, "$.name");
        assert_eq!(err.reason, ValidationReason::MissingField);
    }

    #[test]
    fn test_optional_field_may_be_null() {
        let payload = r#"{"name": "x", "done": true, "tasks": [{"title": "a", "priority": "low", "line": null}]}"#;
        assert!(validate(payload, &root_shape()).is_ok());
    }

    #[test]
    fn test_no_string_to_number_coercion() {
        let payload = r#"{"name": "x", "done": true, "tasks": [{"title": "a", "priority": "low", "line": "12"}]}"#;
        let err = validate(payload, &root_shape()).unwrap_err();
        assert_eq!(err.path, "$.tasks[0].line");
        assert_eq!(
            err.reason,
            ValidationReason::WrongType {
                expected: "integer",
                found: "string"
            }
        );
    }

    #[test]
    fn test_float_is_not_integer() {
        let payload = r#"{"name": "x", "done": true, "tasks": [{"title": "a", "priority": "low", "line": 1.5}]}"#;
        let err = validate(payload, &root_shape()).unwrap_err();
        assert_eq!(err.path, "$.tasks[0].line");
    }

    #[test]
    fn test_no_number_to_string_coercion() {
        let err = validate(r#"{"name": 5, "done": true, "tasks": []}"#, &root_shape()).unwrap_err();
        assert_eq!(err.path, "$.name");
    }

    #[test]
    fn test_literal_outside_allowed_set() {
        let payload = r#"{"name": "x", "done": true, "tasks": [{"title": "a", "priority": "urgent"}]}"#;
        let err = validate(payload, &root_shape()).unwrap_err();
        assert_eq!(err.path, "$.tasks[0].priority");
        assert!(err.to_string().contains("'urgent' is not one of [high, medium, low]"));
    }

    #[test]
    fn test_first_error_follows_declaration_order() {
        // Both `name` and `done` are wrong; `name` is declared first.
        let payload = r#"{"done": "yes", "tasks": 3, "name": 1}"#;
        let first = validate(payload, &root_shape()).unwrap_err();
        let second = validate(payload, &root_shape()).unwrap_err();
        assert_eq!(first.path, "$.name");
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_must_be_object() {
        let err = validate("[1, 2]", &root_shape()).unwrap_err();
        assert_eq!(err.path, "$");
        assert_eq!(
            err.reason,
            ValidationReason::WrongType {
                expected: "object",
                found: "array"
            }
        );
    }
}
