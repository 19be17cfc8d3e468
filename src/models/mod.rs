// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod notes;
pub mod query;
pub mod schema;
pub mod search_result;

pub use notes::{ResearchNotes, RunStats};
pub use query::{QueryList, SearchQuery};
pub use schema::ExtractionSchema;
pub use search_result::{SearchResponse, SearchResult};
