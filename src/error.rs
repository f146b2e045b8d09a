// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Every per-page error is handled by the task that hit it: it gets logged and
// the task stops. None of these abort the crawl as a whole. `HostMismatch` is
// not really a failure, it is how the engine says "this link leaves the site".
// =============================================================================

use thiserror::Error;

/// Errors produced while crawling a single page
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The string is not a well-formed URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The URL points at a different host than the one being crawled
    #[error("{url} is not on host {expected}")]
    HostMismatch { url: String, expected: String },

    /// The HTML document could not be processed at all
    #[error("HTML parsing error: {0}")]
    Parse(String),

    /// Bad status code, wrong content type, or transport failure
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The URL parsed but cannot be reduced to a host+path key
    #[error("cannot normalize '{url}': {reason}")]
    Normalize { url: String, reason: String },

    /// Crawl parameters that can never produce a working crawl
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CrawlError {
    pub fn invalid_url(url: &str, reason: impl ToString) -> Self {
        CrawlError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        CrawlError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
