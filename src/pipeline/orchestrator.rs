// file: src/pipeline/orchestrator.rs
// description: query generation, concurrent search, digest and note extraction
// reference: orchestrates the asynchronous research workflow

use crate::config::{Config, SearchFailurePolicy};
use crate::error::{ResearchError, Result};
use crate::llm::{ChatMessage, ChatModel, ChatRequest, parse_structured};
use crate::models::{ExtractionSchema, QueryList, ResearchNotes, RunStats, SearchResponse};
use crate::pipeline::digest::{DigestOptions, build_digest};
use crate::pipeline::progress::ProgressTracker;
use crate::pipeline::prompts::{self, QUERY_REQUEST_MESSAGE};
use crate::search::{SearchProvider, SearchRequest};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Research pipeline for a list of target companies.
///
/// One run is four steps: the model writes search queries, every query is
/// searched concurrently, results are merged into a deduplicated digest, and
/// the model takes notes from the digest against the extraction schema.
pub struct ResearchPipeline {
    model: Arc<dyn ChatModel>,
    search: Arc<dyn SearchProvider>,
    progress_bar: Option<bool>,
}

impl ResearchPipeline {
    pub fn new(model: Arc<dyn ChatModel>, search: Arc<dyn SearchProvider>) -> Self {
        Self {
            model,
            search,
            progress_bar: None,
        }
    }

    /// Draw a progress bar on stderr while searches are in flight.
    pub fn with_progress_bar(mut self, colored: bool) -> Self {
        self.progress_bar = Some(colored);
        self
    }

    /// Runs the pipeline and returns the notes text.
    pub async fn run(
        &self,
        targets: &str,
        schema: &ExtractionSchema,
        config: &Config,
    ) -> Result<String> {
        Ok(self.run_detailed(targets, schema, config).await?.notes)
    }

    /// Runs the pipeline and returns the notes with the queries used and run statistics.
    pub async fn run_detailed(
        &self,
        targets: &str,
        schema: &ExtractionSchema,
        config: &Config,
    ) -> Result<ResearchNotes> {
        let start = Instant::now();
        info!("Starting research run with {}", self.model.model_name());

        let queries = self.generate_queries(targets, schema, config).await?;

        let tracker = match self.progress_bar {
            Some(colored) => ProgressTracker::new(colored),
            None => ProgressTracker::hidden(),
        };
        let responses = self.search_all(&queries, config, &tracker).await;
        tracker.finish();
        let responses = responses?;
        let counts = tracker.counts();

        let digest = build_digest(&responses, &DigestOptions::from(&config.research));
        info!(
            "Digest built from {} unique sources ({} results)",
            digest.unique_sources, digest.total_results
        );

        let notes = self.extract_notes(schema, &digest.text, config).await?;

        let stats = RunStats {
            queries_issued: queries.len(),
            queries_failed: counts.queries_failed,
            results_received: digest.total_results,
            unique_sources: digest.unique_sources,
            digest_chars: digest.text.chars().count(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Research run complete in {} ms ({:.0}% of searches succeeded)",
            stats.duration_ms,
            stats.success_rate()
        );

        Ok(ResearchNotes::new(targets, queries, notes, stats))
    }

    /// Step 1: one structured model call producing the search queries.
    pub async fn generate_queries(
        &self,
        targets: &str,
        schema: &ExtractionSchema,
        config: &Config,
    ) -> Result<Vec<String>> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(prompts::query_writer_prompt(targets, schema)),
            ChatMessage::user(QUERY_REQUEST_MESSAGE),
        ])
        .json()
        .with_temperature(config.model.temperature);

        let raw = self.model.complete(request).await?;
        let list: QueryList = parse_structured(&raw)?;
        let queries = list.into_query_strings();

        if queries.is_empty() {
            warn!("Model produced no search queries; notes will be taken from an empty digest");
        } else {
            info!("Generated {} search queries", queries.len());
        }
        for query in &queries {
            debug!("Search query: {}", query);
        }

        Ok(queries)
    }

    /// Step 2: searches every query concurrently. Responses keep query order.
    pub async fn search_all(
        &self,
        queries: &[String],
        config: &Config,
        tracker: &ProgressTracker,
    ) -> Result<Vec<SearchResponse>> {
        let concurrency = config
            .research
            .search_concurrency
            .unwrap_or(queries.len())
            .max(1);

        tracker.start(queries.len());
        info!(
            "Running {} searches ({} in flight)",
            queries.len(),
            concurrency.min(queries.len())
        );

        // each future must be `Send`; runs are spawned and served over MCP
        let pending: Vec<BoxFuture<'_, Result<SearchResponse>>> = queries
            .iter()
            .map(|query| {
                let request = SearchRequest {
                    include_raw_content: config.research.include_raw_content,
                    ..SearchRequest::new(query, &config.search)
                };
                self.search_one(request, tracker).boxed()
            })
            .collect();
        let searches = stream::iter(pending).buffered(concurrency);

        match config.research.failure_policy {
            SearchFailurePolicy::AllOrNothing => searches.try_collect().await,
            SearchFailurePolicy::Isolate => {
                let outcomes: Vec<Result<SearchResponse>> = searches.collect().await;
                let attempted = outcomes.len();
                let responses: Vec<SearchResponse> =
                    outcomes.into_iter().filter_map(|outcome| outcome.ok()).collect();

                if attempted > 0 && responses.is_empty() {
                    return Err(ResearchError::AllSearchesFailed { attempted });
                }
                if responses.len() < attempted {
                    warn!(
                        "Continuing with {} of {} searches",
                        responses.len(),
                        attempted
                    );
                }

                Ok(responses)
            }
        }
    }

    async fn search_one(
        &self,
        request: SearchRequest,
        tracker: &ProgressTracker,
    ) -> Result<SearchResponse> {
        let result = self.search.search(&request).await;
        match &result {
            Ok(response) => tracker.record_success(response.results.len()),
            Err(e) => {
                tracker.record_failure();
                warn!("{}", e);
            }
        }
        result
    }

    /// Step 4: free-text note taking over the digest.
    pub async fn extract_notes(
        &self,
        schema: &ExtractionSchema,
        digest: &str,
        config: &Config,
    ) -> Result<String> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompts::notes_prompt(
            schema, digest,
        ))])
        .with_temperature(config.model.temperature);

        let notes = self.model.complete(request).await?;
        debug!("Extracted {} chars of notes", notes.len());

        Ok(notes)
    }
}
