//! Session-scoped coordination: search generations and in-flight
//! enrichment tracking.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Monotonic generation counter for search invocations.
///
/// A search takes a generation with [`begin`](Self::begin) before
/// dispatching; when its batches arrive it checks
/// [`is_current`](Self::is_current) and discards them if a newer search
/// has started since. This keeps a late, stale response from clobbering a
/// newer result set.
#[derive(Debug, Default)]
pub struct SearchGeneration {
    latest: AtomicU64,
}

impl SearchGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search and returns its generation number.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while `generation` is still the most recently started search.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }
}

/// Tracks which results have an email-enrichment request in flight, so a
/// second request for the same result is refused instead of duplicated.
///
/// Entries are added on request start and must be removed on completion
/// regardless of outcome.
#[derive(Debug, Default)]
pub struct EnrichmentTracker {
    in_flight: Mutex<HashSet<String>>,
}

impl EnrichmentTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `source_id` as in flight. Returns `false` when a request for
    /// it is already running.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn begin(&self, source_id: &str) -> bool {
        self.in_flight
            .lock()
            .expect("enrichment tracker lock poisoned")
            .insert(source_id.to_string())
    }

    /// Releases `source_id`. Safe to call for ids that were never begun.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn finish(&self, source_id: &str) {
        self.in_flight
            .lock()
            .expect("enrichment tracker lock poisoned")
            .remove(source_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase_monotonically() {
        let generation = SearchGeneration::new();
        let first = generation.begin();
        let second = generation.begin();
        assert!(second > first);
    }

    #[test]
    fn stale_generation_is_not_current() {
        let generation = SearchGeneration::new();
        let stale = generation.begin();
        let fresh = generation.begin();
        assert!(!generation.is_current(stale));
        assert!(generation.is_current(fresh));
    }

    #[test]
    fn duplicate_in_flight_enrichment_is_refused() {
        let tracker = EnrichmentTracker::new();
        assert!(tracker.begin("r1"));
        assert!(!tracker.begin("r1"));
        assert!(tracker.begin("r2"));
    }

    #[test]
    fn finishing_releases_the_id_whatever_the_outcome() {
        let tracker = EnrichmentTracker::new();
        assert!(tracker.begin("r1"));
        tracker.finish("r1");
        assert!(tracker.begin("r1"));
    }

    #[test]
    fn finishing_an_unknown_id_is_a_no_op() {
        let tracker = EnrichmentTracker::new();
        tracker.finish("never-started");
        assert!(tracker.begin("never-started"));
    }
}
