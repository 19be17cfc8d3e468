// file: src/search/tavily.rs
// description: Tavily search API client
// reference: https://docs.tavily.com/documentation/api-reference/endpoint/search

use super::{SearchProvider, SearchRequest};
use crate::config::{SearchConfig, SearchDepth};
use crate::error::{ResearchError, Result};
use crate::models::SearchResponse;
use crate::utils::Validator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct TavilySearchBody<'a> {
    query: &'a str,
    max_results: usize,
    include_raw_content: bool,
    topic: &'a str,
    search_depth: SearchDepth,
}

pub struct TavilyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TavilyClient {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let api_key = Validator::require_api_key("Tavily", config.api_key.as_deref())?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResearchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);

        let body = TavilySearchBody {
            query: &request.query,
            max_results: request.max_results,
            include_raw_content: request.include_raw_content,
            topic: request.topic.as_str(),
            search_depth: request.search_depth,
        };

        debug!("Searching Tavily for '{}'", request.query);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ResearchError::search(&request.query, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ResearchError::search(
                &request.query,
                format!("status {}: {}", status, error_text),
            ));
        }

        let mut parsed: SearchResponse = response.json().await.map_err(|e| {
            ResearchError::search(&request.query, format!("invalid response body: {}", e))
        })?;

        if parsed.query.is_empty() {
            parsed.query = request.query.clone();
        }

        debug!(
            "Tavily returned {} results for '{}'",
            parsed.results.len(),
            request.query
        );

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchTopic;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            max_results: 3,
            include_raw_content: true,
            topic: SearchTopic::General,
            search_depth: SearchDepth::Basic,
        }
    }

    #[tokio::test]
    async fn test_search_sends_expected_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("Authorization", "Bearer tvly-test"))
            .and(body_json(json!({
                "query": "Acme Corp headquarters",
                "max_results": 3,
                "include_raw_content": true,
                "topic": "general",
                "search_depth": "basic"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "Acme Corp headquarters",
                "results": [
                    {
                        "title": "Acme Corp",
                        "url": "https://acme.example",
                        "content": "Headquartered in Springfield.",
                        "raw_content": "Acme Corp is headquartered in Springfield.",
                        "score": 0.8
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TavilyClient::new(&server.uri(), "tvly-test".into());
        let response = client.search(&request("Acme Corp headquarters")).await.unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].url, "https://acme.example");
        assert_eq!(
            response.results[0].raw_content.as_deref(),
            Some("Acme Corp is headquartered in Springfield.")
        );
    }

    #[tokio::test]
    async fn test_search_error_status_names_query() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = TavilyClient::new(&server.uri(), "bad".into());
        let err = client.search(&request("Globex Inc")).await.unwrap_err();

        match err {
            ResearchError::Search { query, message } => {
                assert_eq!(query, "Globex Inc");
                assert!(message.contains("401"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_fills_missing_query() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;

        let client = TavilyClient::new(&server.uri(), "k".into());
        let response = client.search(&request("Initech")).await.unwrap();
        assert_eq!(response.query, "Initech");
        assert!(response.results.is_empty());
    }
}
