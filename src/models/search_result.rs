// file: src/models/search_result.rs
// description: documents returned by the web search provider
// reference: https://docs.tavily.com/documentation/api-reference/endpoint/search

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title
    #[serde(default)]
    pub title: String,

    /// Source identifier used for deduplication
    pub url: String,

    /// Short extract picked by the provider
    #[serde(default)]
    pub content: String,

    /// Cleaned full page text, only present when requested
    #[serde(default)]
    pub raw_content: Option<String>,

    /// Provider relevance score
    #[serde(default)]
    pub score: Option<f64>,
}

impl SearchResult {
    pub fn new(title: &str, url: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            content: content.to_string(),
            raw_content: None,
            score: None,
        }
    }

    pub fn with_raw_content(mut self, raw_content: &str) -> Self {
        self.raw_content = Some(raw_content.to_string());
        self
    }
}

/// Results for one query, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub results: Vec<SearchResult>,

    /// Provider-side latency in seconds
    #[serde(default)]
    pub response_time: Option<f64>,
}

impl SearchResponse {
    pub fn new(query: &str, results: Vec<SearchResult>) -> Self {
        Self {
            query: query.to_string(),
            results,
            response_time: None,
        }
    }
}
