// file: src/mcp/server.rs
// description: MCP server exposing the research pipeline as a tool
// reference: https://docs.rs/rmcp

use crate::config::Config;
use crate::error::ResearchError;
use crate::models::ExtractionSchema;
use crate::pipeline::{ResearchPipeline, prompts};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct ResearchToolRequest {
    #[schemars(description = "Free-text list of companies to research, e.g. \"Acme Corp, Globex Inc\"")]
    pub targets: String,

    #[schemars(
        description = "Field name to description mapping of the information to collect. Defaults to the server's configured schema."
    )]
    #[serde(default)]
    pub extraction_schema: Option<ExtractionSchema>,
}

#[derive(Clone)]
pub struct EnrichNotesMcp {
    pipeline: Arc<ResearchPipeline>,
    config: Arc<Config>,
    default_schema: Option<ExtractionSchema>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl EnrichNotesMcp {
    pub fn new(
        pipeline: ResearchPipeline,
        config: Config,
        default_schema: Option<ExtractionSchema>,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
            default_schema,
            tool_router: Self::tool_router(),
        }
    }

    pub fn get_tool_router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    /// Runs the pipeline for one tool call.
    pub async fn research(&self, request: ResearchToolRequest) -> crate::error::Result<String> {
        let schema = request
            .extraction_schema
            .or_else(|| self.default_schema.clone())
            .ok_or_else(|| {
                ResearchError::Validation(
                    "No extraction_schema given and no default schema configured".to_string(),
                )
            })?;

        info!("MCP: Researching {}", request.targets);
        self.pipeline
            .run(&request.targets, &schema, &self.config)
            .await
    }

    #[tool(
        description = "Execute a multi-step web search and information extraction process: writes one search query per company, searches the web concurrently, deduplicates the sources and returns notes aligned with the extraction schema."
    )]
    async fn perform_web_research(
        &self,
        Parameters(request): Parameters<ResearchToolRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.research(request).await {
            Ok(notes) => Ok(CallToolResult::success(vec![Content::text(notes)])),
            Err(ResearchError::Validation(message)) => Err(McpError::invalid_params(message, None)),
            Err(e) => {
                error!("MCP: Research failed: {}", e);
                Err(McpError::internal_error(e.to_string(), None))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for EnrichNotesMcp {
    fn get_info(&self) -> ServerInfo {
        let schema = self.default_schema.clone().unwrap_or_default();

        ServerInfo {
            instructions: Some(prompts::research_brief(
                &schema,
                "the companies passed in the `targets` argument",
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::llm::{ChatModel, ChatRequest};
    use crate::models::SearchResponse;
    use crate::search::{SearchProvider, SearchRequest};
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn complete(&self, request: ChatRequest) -> Result<String> {
            let prompt = &request.messages[0].content;
            if prompt.contains("search query generator") {
                Ok(r#"{"queries": [{"search_query": "Initech headquarters"}]}"#.to_string())
            } else {
                Ok(format!("notes over {} chars", prompt.len()))
            }
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    struct EmptySearch;

    #[async_trait]
    impl SearchProvider for EmptySearch {
        async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
            Ok(SearchResponse::new(&request.query, vec![]))
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl SearchProvider for FailingSearch {
        async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
            Err(ResearchError::search(&request.query, "status 502"))
        }
    }

    fn server(default_schema: Option<ExtractionSchema>) -> EnrichNotesMcp {
        server_with(Arc::new(EmptySearch), default_schema)
    }

    fn server_with(
        search: Arc<dyn SearchProvider>,
        default_schema: Option<ExtractionSchema>,
    ) -> EnrichNotesMcp {
        let pipeline = ResearchPipeline::new(Arc::new(EchoModel), search);
        EnrichNotesMcp::new(pipeline, Config::default_config(), default_schema)
    }

    fn tool_request(extraction_schema: Option<ExtractionSchema>) -> Parameters<ResearchToolRequest> {
        Parameters(ResearchToolRequest {
            targets: "Initech".to_string(),
            extraction_schema,
        })
    }

    #[test]
    fn test_tool_is_registered() {
        let mcp = server(None);
        let names: Vec<String> = mcp
            .get_tool_router()
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert_eq!(names, vec!["perform_web_research".to_string()]);
    }

    #[tokio::test]
    async fn test_research_uses_default_schema() {
        let schema = ExtractionSchema::try_from(json!({"ceo": "Chief executive"})).unwrap();
        let mcp = server(Some(schema));

        let notes = mcp
            .research(ResearchToolRequest {
                targets: "Initech".to_string(),
                extraction_schema: None,
            })
            .await
            .unwrap();
        assert!(notes.starts_with("notes over"));
    }

    #[tokio::test]
    async fn test_research_without_any_schema_is_rejected() {
        let mcp = server(None);
        let result = mcp
            .research(ResearchToolRequest {
                targets: "Initech".to_string(),
                extraction_schema: None,
            })
            .await;
        assert!(matches!(result, Err(ResearchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_tool_call_returns_notes_as_text() {
        let schema = ExtractionSchema::try_from(json!({"ceo": "Chief executive"})).unwrap();
        let mcp = server(None);

        let result = mcp
            .perform_web_research(tool_request(Some(schema)))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
        let body = serde_json::to_value(&result).unwrap();
        assert_eq!(body["content"][0]["type"], "text");
        assert!(
            body["content"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("notes over")
        );
    }

    #[tokio::test]
    async fn test_tool_call_without_schema_is_invalid_params() {
        let err = server(None)
            .perform_web_research(tool_request(None))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("extraction_schema"));
    }

    #[tokio::test]
    async fn test_tool_call_with_failing_search_is_internal_error() {
        let schema = ExtractionSchema::try_from(json!({"ceo": "Chief executive"})).unwrap();
        let mcp = server_with(Arc::new(FailingSearch), Some(schema));

        let err = mcp.perform_web_research(tool_request(None)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("Initech headquarters"));
    }

    #[test]
    fn test_request_deserializes_inline_schema() {
        let request: ResearchToolRequest = serde_json::from_value(json!({
            "targets": "Acme Corp, Globex Inc",
            "extraction_schema": {"founded_year": "Year founded"}
        }))
        .unwrap();
        assert_eq!(request.extraction_schema.unwrap().fields().len(), 1);
    }

    #[test]
    fn test_server_info_carries_brief() {
        let info = server(None).get_info();
        assert!(info.instructions.unwrap().contains("perform_web_research"));
        assert!(info.capabilities.tools.is_some());
    }
}
