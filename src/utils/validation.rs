// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{ResearchError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ResearchError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Returns the key when present and non-blank.
    pub fn require_api_key<'a>(name: &str, key: Option<&'a str>) -> Result<&'a str> {
        match key.map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ResearchError::Config(format!(
                "{} API key is not configured",
                name
            ))),
        }
    }

    pub fn validate_json_file(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(ResearchError::Validation(format!(
                "Schema file does not exist: {}",
                path.display()
            )));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(()),
            _ => Err(ResearchError::Validation(format!(
                "Schema file is not a .json file: {}",
                path.display()
            ))),
        }
    }

    /// Cuts `text` to at most `max_chars` characters, never splitting a
    /// UTF-8 sequence. Returns the text unchanged when it already fits.
    pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
        match text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => (&text[..byte_idx], true),
            None => (text, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://api.tavily.com").is_ok());
        assert!(Validator::validate_url("http://localhost:8080").is_ok());
        assert!(Validator::validate_url("api.tavily.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_require_api_key() {
        assert_eq!(
            Validator::require_api_key("Tavily", Some(" tvly-123 ")).unwrap(),
            "tvly-123"
        );
        assert!(Validator::require_api_key("Tavily", Some("   ")).is_err());
        assert!(Validator::require_api_key("Groq", None).is_err());
    }

    #[test]
    fn test_validate_json_file() {
        let temp = TempDir::new().unwrap();
        let schema = temp.path().join("schema.json");
        fs::write(&schema, "{}").unwrap();
        let other = temp.path().join("schema.txt");
        fs::write(&other, "{}").unwrap();

        assert!(Validator::validate_json_file(&schema).is_ok());
        assert!(Validator::validate_json_file(&other).is_err());
        assert!(Validator::validate_json_file(&temp.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(Validator::truncate_chars("short", 10), ("short", false));
        assert_eq!(Validator::truncate_chars("exact", 5), ("exact", false));
        assert_eq!(
            Validator::truncate_chars("this is a very long text", 10),
            ("this is a ", true)
        );
        // multi-byte characters count once
        assert_eq!(Validator::truncate_chars("Zürich AG", 3), ("Zür", true));
    }
}
