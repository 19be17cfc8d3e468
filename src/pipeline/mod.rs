// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod digest;
mod orchestrator;
mod progress;
pub mod prompts;

pub use digest::{DigestOptions, SourceDigest, build_digest, deduplicate};
pub use orchestrator::ResearchPipeline;
pub use progress::{ProgressTracker, SearchCounts};
