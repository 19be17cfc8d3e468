// file: src/pipeline/progress.rs
// description: progress tracking for the concurrent search fan-out
// reference: uses indicatif for progress bars and tracks query metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounts {
    pub queries_completed: usize,
    pub queries_failed: usize,
    pub results_received: usize,
}

/// Shared by every in-flight search; counters are atomic so the futures only
/// need `&ProgressTracker`.
pub struct ProgressTracker {
    bar: ProgressBar,
    queries_completed: AtomicUsize,
    queries_failed: AtomicUsize,
    results_received: AtomicUsize,
}

impl ProgressTracker {
    /// Draws a bar on stderr.
    pub fn new(colored: bool) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(bar_style(colored));
        Self::with_bar(bar)
    }

    /// Counts without drawing anything.
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            queries_completed: AtomicUsize::new(0),
            queries_failed: AtomicUsize::new(0),
            results_received: AtomicUsize::new(0),
        }
    }

    pub fn start(&self, total_queries: usize) {
        self.bar.set_length(total_queries as u64);
        self.bar.set_position(0);
        self.bar.set_message("searching");
    }

    pub fn record_success(&self, results: usize) {
        self.queries_completed.fetch_add(1, Ordering::SeqCst);
        self.results_received.fetch_add(results, Ordering::SeqCst);
        self.bar.inc(1);
        self.update_message();
    }

    pub fn record_failure(&self) {
        self.queries_completed.fetch_add(1, Ordering::SeqCst);
        self.queries_failed.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
        self.update_message();
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn counts(&self) -> SearchCounts {
        SearchCounts {
            queries_completed: self.queries_completed.load(Ordering::SeqCst),
            queries_failed: self.queries_failed.load(Ordering::SeqCst),
            results_received: self.results_received.load(Ordering::SeqCst),
        }
    }

    fn update_message(&self) {
        let results = self.results_received.load(Ordering::SeqCst);
        let failed = self.queries_failed.load(Ordering::SeqCst);

        self.bar
            .set_message(format!("Results: {} | Failed: {}", results, failed));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn bar_style(colored: bool) -> ProgressStyle {
    let (template, chars) = if colored {
        (
            "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} queries {msg}",
            "█▓▒░",
        )
    } else {
        (
            "{spinner} [{elapsed_precise}] [{bar:30}] {pos}/{len} queries {msg}",
            "=>-",
        )
    };

    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(chars)
}
