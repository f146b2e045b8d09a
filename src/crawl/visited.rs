// src/crawl/visited.rs
// =============================================================================
// The shared "which pages have we seen, and how often" map.
//
// Every crawl task reads and writes this map, so all access goes through one
// mutex. The important operation is `record_visit`: it checks whether a key is
// new AND bumps its count inside one critical section. If the check and the
// write were separate, two tasks could both see "new" and both fetch the page.
//
// We use std::sync::Mutex rather than tokio's because the lock is never held
// across an .await.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of recording one reference to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First time this key was seen; `ordinal` is how many distinct pages
    /// were known right after inserting it (1 for the very first page)
    First { ordinal: usize },
    /// The key was already present; its count was incremented
    Repeat,
}

/// Normalized URL -> number of times it was referenced
#[derive(Debug, Default)]
pub struct VisitedPages {
    pages: Mutex<HashMap<String, usize>>,
}

impl VisitedPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically inserts `key` with count 1, or increments its count
    pub fn record_visit(&self, key: &str) -> Visit {
        let mut pages = self.lock();

        if let Some(count) = pages.get_mut(key) {
            *count += 1;
            return Visit::Repeat;
        }

        pages.insert(key.to_string(), 1);
        Visit::First {
            ordinal: pages.len(),
        }
    }

    /// True once the number of distinct pages reaches `max_pages`
    pub fn limit_reached(&self, max_pages: usize) -> bool {
        self.lock().len() >= max_pages
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Copy of the current counts
    pub fn snapshot(&self) -> HashMap<String, usize> {
        self.lock().clone()
    }

    // A panic in another task can't leave the map half-updated (every write
    // is a single insert or increment), so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_first_then_repeat() {
        let visited = VisitedPages::new();
        assert_eq!(visited.record_visit("a.com"), Visit::First { ordinal: 1 });
        assert_eq!(visited.record_visit("a.com/x"), Visit::First { ordinal: 2 });
        assert_eq!(visited.record_visit("a.com"), Visit::Repeat);
        assert_eq!(visited.record_visit("a.com"), Visit::Repeat);

        let counts = visited.snapshot();
        assert_eq!(counts["a.com"], 3);
        assert_eq!(counts["a.com/x"], 1);
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_limit_reached() {
        let visited = VisitedPages::new();
        assert!(!visited.limit_reached(2));
        visited.record_visit("a");
        assert!(!visited.limit_reached(2));
        visited.record_visit("a");
        assert!(!visited.limit_reached(2));
        visited.record_visit("b");
        assert!(visited.limit_reached(2));
    }

    #[test]
    fn test_exactly_one_first_visit_under_contention() {
        let visited = Arc::new(VisitedPages::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let visited = Arc::clone(&visited);
                thread::spawn(move || {
                    (0..100)
                        .filter(|_| matches!(visited.record_visit("same"), Visit::First { .. }))
                        .count()
                })
            })
            .collect();

        let firsts: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(firsts, 1);
        assert_eq!(visited.snapshot()["same"], 1600);
    }

    #[test]
    fn test_ordinals_are_unique() {
        let visited = Arc::new(VisitedPages::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let visited = Arc::clone(&visited);
                thread::spawn(move || match visited.record_visit(&format!("page-{}", i)) {
                    Visit::First { ordinal } => ordinal,
                    Visit::Repeat => 0,
                })
            })
            .collect();

        let mut ordinals: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ordinals.sort_unstable();
        assert_eq!(ordinals, (1..=8).collect::<Vec<_>>());
    }
}
