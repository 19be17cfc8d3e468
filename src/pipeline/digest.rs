// file: src/pipeline/digest.rs
// description: deduplicate search results by url and format them as model context

use crate::config::ResearchConfig;
use crate::models::{SearchResponse, SearchResult};
use crate::utils::Validator;
use std::collections::HashSet;

const TRUNCATION_MARKER: &str = "... [truncated]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestOptions {
    pub max_tokens_per_source: usize,
    pub chars_per_token: usize,
    pub include_raw_content: bool,
}

impl DigestOptions {
    pub fn char_limit(&self) -> usize {
        self.max_tokens_per_source.saturating_mul(self.chars_per_token)
    }
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            max_tokens_per_source: 1000,
            chars_per_token: 4,
            include_raw_content: true,
        }
    }
}

impl From<&ResearchConfig> for DigestOptions {
    fn from(research: &ResearchConfig) -> Self {
        Self {
            max_tokens_per_source: research.max_tokens_per_source,
            chars_per_token: research.chars_per_token,
            include_raw_content: research.include_raw_content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDigest {
    pub text: String,
    pub unique_sources: usize,
    pub total_results: usize,
}

/// Keeps the first result seen for each url, walking responses in query
/// order and results in provider order.
pub fn deduplicate(responses: &[SearchResponse]) -> Vec<&SearchResult> {
    let mut seen = HashSet::new();

    responses
        .iter()
        .flat_map(|response| response.results.iter())
        .filter(|result| seen.insert(result.url.as_str()))
        .collect()
}

pub fn build_digest(responses: &[SearchResponse], options: &DigestOptions) -> SourceDigest {
    let total_results = responses.iter().map(|r| r.results.len()).sum();
    let unique = deduplicate(responses);
    let char_limit = options.char_limit();

    let mut text = String::from("Sources:\n\n");

    for source in &unique {
        text.push_str(&format!("Source {}:\n===\n", source.title));
        text.push_str(&format!("URL: {}\n===\n", source.url));
        text.push_str(&format!(
            "Most relevant content from source: {}\n===\n",
            limit_chars(&source.content, char_limit)
        ));

        if options.include_raw_content {
            let raw_content = source.raw_content.as_deref().unwrap_or_default();
            text.push_str(&format!(
                "Full source content limited to {} tokens: {}\n\n",
                options.max_tokens_per_source,
                limit_chars(raw_content, char_limit)
            ));
        } else {
            text.push('\n');
        }
    }

    SourceDigest {
        text: text.trim().to_string(),
        unique_sources: unique.len(),
        total_results,
    }
}

fn limit_chars(text: &str, max_chars: usize) -> String {
    match Validator::truncate_chars(text, max_chars) {
        (kept, true) => format!("{}{}", kept, TRUNCATION_MARKER),
        (kept, false) => kept.to_string(),
    }
}
