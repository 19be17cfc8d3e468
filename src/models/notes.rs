// file: src/models/notes.rs
// description: record of one research run, exported as json

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub queries_issued: usize,
    pub queries_failed: usize,
    pub results_received: usize,
    pub unique_sources: usize,
    pub digest_chars: usize,
    pub duration_ms: u64,
}

impl RunStats {
    pub fn success_rate(&self) -> f64 {
        if self.queries_issued == 0 {
            return 0.0;
        }
        let succeeded = self.queries_issued.saturating_sub(self.queries_failed);
        (succeeded as f64 / self.queries_issued as f64) * 100.0
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.results_received.saturating_sub(self.unique_sources)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchNotes {
    pub run_id: String,
    pub targets: String,
    pub queries: Vec<String>,
    pub notes: String,
    pub created_at: String,
    pub stats: RunStats,
}

impl ResearchNotes {
    pub fn new(targets: &str, queries: Vec<String>, notes: String, stats: RunStats) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            targets: targets.to_string(),
            queries,
            notes,
            created_at: Utc::now().to_rfc3339(),
            stats,
        }
    }
}
