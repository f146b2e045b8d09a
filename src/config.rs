// src/config.rs
// =============================================================================
// Crawl parameters.
//
// A CrawlConfig is built once in main() from the CLI arguments and then shared
// (behind an Arc) with every crawl task. Nothing mutates it after that, so
// tasks can read it without locking.
// =============================================================================

use std::time::Duration;

use tokio::sync::Semaphore;
use url::Url;

use crate::error::CrawlError;
use crate::page::host_key;

/// Default per-request timeout, same as the link checker used
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Immutable settings for one crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL; relative links are resolved against it
    pub base_url: Url,

    /// `host[:port]` of the seed, the only host we fetch from
    pub base_host: String,

    /// Stop starting new fetches once this many distinct pages are known
    pub max_pages: usize,

    /// How many tasks may do network I/O at the same time
    pub max_concurrency: usize,

    /// Per-request timeout; None lets a request wait forever
    pub request_timeout: Option<Duration>,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl CrawlConfig {
    /// Validates the three required parameters
    ///
    /// Fails when the base URL has no host, when either limit is zero
    /// (a zero-slot budget would never let the seed page through), or when
    /// the concurrency is more than a tokio Semaphore can hold.
    pub fn new(base_url: Url, max_concurrency: usize, max_pages: usize) -> Result<Self, CrawlError> {
        let base_host = host_key(&base_url)
            .ok_or_else(|| CrawlError::invalid_url(base_url.as_str(), "URL has no host"))?;

        if max_concurrency == 0 {
            return Err(CrawlError::InvalidConfig(
                "max concurrency must be at least 1".to_string(),
            ));
        }
        if max_concurrency > Semaphore::MAX_PERMITS {
            return Err(CrawlError::InvalidConfig(format!(
                "max concurrency must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if max_pages == 0 {
            return Err(CrawlError::InvalidConfig(
                "max pages must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            base_host,
            max_pages,
            max_concurrency,
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: format!("site-crawler/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Set the per-request timeout (None disables it)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the user agent to use for requests
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
