// file: src/models/query.rs
// description: structured search queries produced by the query-writer model call

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One query as the model emits it. The model may leave it out or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_query: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryList {
    pub queries: Vec<SearchQuery>,
}

impl QueryList {
    /// Shape description appended to the query-writer prompt.
    pub const FORMAT_INSTRUCTIONS: &'static str = r#"Respond with a JSON object and nothing else, using exactly this shape:
{"queries":[{"search_query":"<query for web search>"}]}"#;

    pub fn from_queries<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queries: queries.into_iter().map(SearchQuery::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Query strings in model order. Missing or blank entries are dropped;
    /// duplicates are kept.
    pub fn into_query_strings(self) -> Vec<String> {
        let total = self.queries.len();
        let queries: Vec<String> = self
            .queries
            .into_iter()
            .filter_map(|q| q.search_query)
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if queries.len() < total {
            warn!(
                "Dropped {} blank search queries from model output",
                total - queries.len()
            );
        }

        queries
    }
}
