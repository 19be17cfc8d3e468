// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResearchError>;

#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model call failed: {0}")]
    Model(String),

    #[error("Model output did not match {expected}: {message}")]
    SchemaMismatch { expected: String, message: String },

    #[error("Search failed for query '{query}': {message}")]
    Search { query: String, message: String },

    #[error("All {attempted} search queries failed")]
    AllSearchesFailed { attempted: usize },

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResearchError {
    pub fn schema_mismatch<T>(message: impl ToString) -> Self {
        let expected = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("structured output")
            .to_string();

        Self::SchemaMismatch {
            expected,
            message: message.to_string(),
        }
    }

    pub fn search(query: &str, message: impl ToString) -> Self {
        Self::Search {
            query: query.to_string(),
            message: message.to_string(),
        }
    }
}
