// src/page/mod.rs
// =============================================================================
// Everything the crawler does to a single page, with no shared state:
//
// - normalize: turns a URL into the key used for deduplication
// - html: extracts anchor links from an HTML body
// - fetch: downloads a page and checks it is HTML
//
// None of these know about concurrency; the crawl engine calls them from
// many tasks at once.
// =============================================================================

mod fetch;
mod html;
mod normalize;

pub use fetch::PageFetcher;
pub use html::extract_links;
pub use normalize::{host_key, normalize_url};
