// file: src/llm/structured.rs
// description: parse-and-validate step for model replies that must match a shape
// reference: https://docs.rs/serde_json

use crate::error::{ResearchError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;

lazy_static! {
    // first fenced block anywhere in the reply; the language tag is optional
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)```[A-Za-z0-9_-]*(.*?)```").unwrap();
}

/// Parses a model reply into `T`. When the reply contains a Markdown code
/// fence, only the first fenced block is parsed. Any failure becomes
/// `ResearchError::SchemaMismatch`.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let body = strip_code_fence(raw);

    if body.is_empty() {
        return Err(ResearchError::schema_mismatch::<T>("model returned an empty reply"));
    }

    serde_json::from_str(body).map_err(|e| ResearchError::schema_mismatch::<T>(e))
}

fn strip_code_fence(raw: &str) -> &str {
    match CODE_FENCE.captures(raw).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => raw.trim(),
    }
}
