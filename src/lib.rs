// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod utils;

pub use config::{
    Config, ModelConfig, ResearchConfig, SearchConfig, SearchDepth, SearchFailurePolicy,
    SearchTopic,
};
pub use error::{ResearchError, Result};
pub use exporter::JsonExporter;
pub use llm::{ChatMessage, ChatModel, ChatRequest, OpenAiCompatibleClient, parse_structured};
pub use models::{
    ExtractionSchema, QueryList, ResearchNotes, RunStats, SearchQuery, SearchResponse,
    SearchResult,
};
pub use pipeline::{DigestOptions, ProgressTracker, ResearchPipeline, SourceDigest, build_digest};
pub use search::{SearchProvider, SearchRequest, TavilyClient};
pub use utils::Validator;
