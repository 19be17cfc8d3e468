// file: src/search/mod.rs
// description: web search provider abstraction
// reference: https://docs.tavily.com

pub mod tavily;

pub use tavily::TavilyClient;

use crate::config::{SearchConfig, SearchDepth, SearchTopic};
use crate::error::Result;
use crate::models::SearchResponse;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub include_raw_content: bool,
    pub topic: SearchTopic,
    pub search_depth: SearchDepth,
}

impl SearchRequest {
    pub fn new(query: &str, config: &SearchConfig) -> Self {
        Self {
            query: query.to_string(),
            max_results: config.max_search_results,
            include_raw_content: true,
            topic: config.topic,
            search_depth: config.search_depth,
        }
    }
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;
}
