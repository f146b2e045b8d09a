// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Concurrent crawling of every page reachable from a seed URL
// - Same-host restriction (links to other sites are never fetched)
// - A fixed number of fetches in flight at once
// - A ceiling on the number of distinct pages
// - A reference count for every page found
// =============================================================================

mod engine;
mod visited;

pub use engine::{CrawlSummary, Crawler};
