// file: src/models/schema.rs
// description: extraction schema supplied by the caller and forwarded into prompts
// reference: https://docs.rs/serde_json

use crate::error::{ResearchError, Result};
use crate::utils::Validator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Field name to description mapping. The pipeline never interprets it; it is
/// rendered as pretty JSON into both prompts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(transparent)]
pub struct ExtractionSchema(Map<String, Value>);

impl ExtractionSchema {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Validator::validate_json_file(path)?;

        let content = fs::read_to_string(path).map_err(|e| ResearchError::FileOperation {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::try_from(value)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Pretty JSON with two-space indentation, as embedded in prompts.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl TryFrom<Value> for ExtractionSchema {
    type Error = ResearchError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ResearchError::Validation(format!(
                "Extraction schema must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_prompt_json_is_pretty_printed() {
        let schema = ExtractionSchema::try_from(json!({
            "founded_year": "Year the company was founded",
            "headquarters": "City and country of the head office"
        }))
        .unwrap();

        assert_eq!(
            schema.to_prompt_json(),
            "{\n  \"founded_year\": \"Year the company was founded\",\n  \"headquarters\": \"City and country of the head office\"\n}"
        );
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["founded_year", "headquarters"]
        );
    }

    #[test]
    fn test_rejects_non_object() {
        let err = ExtractionSchema::from_json("[\"founded_year\"]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_empty_schema_is_accepted() {
        let schema = ExtractionSchema::from_json("{}").unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.to_prompt_json(), "{}");
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("schema.json");
        fs::write(&path, r#"{"ceo": "Current chief executive"}"#).unwrap();

        let schema = ExtractionSchema::from_file(&path).unwrap();
        assert_eq!(schema.fields().len(), 1);
        assert_eq!(schema.fields()["ceo"], json!("Current chief executive"));
    }
}
