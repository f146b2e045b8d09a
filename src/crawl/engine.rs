// src/crawl/engine.rs
// =============================================================================
// The concurrent crawl engine.
//
// How it works:
// 1. The seed URL becomes the first crawl task
// 2. Each task waits for a slot in the concurrency budget (a Semaphore),
//    then decides whether its URL should be fetched at all
// 3. If it is the first visit to that page, the task fetches it, extracts
//    links and hands back the ones that should be crawled next
// 4. The coordinator spawns one new task per returned link
// 5. The crawl is over when every spawned task has finished
//
// Limits:
// - At most `max_concurrency` tasks hold a slot at any moment; spawning a task
//   is cheap, the slot is what gates network I/O
// - Once `max_pages` distinct pages are known, tasks stop early and no new
//   fetches start; fetches already running are allowed to finish
//
// Errors never escape a task. A page that fails to fetch stays in the
// visited map and is never retried.
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

use super::visited::{Visit, VisitedPages};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::page::{extract_links, host_key, normalize_url, PageFetcher};

/// Final state of a crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Normalized URL -> number of internal references (the seed counts once)
    pub pages: HashMap<String, usize>,
    /// Pages whose fetch was actually started
    pub fetched: usize,
    /// Pages whose fetch or link extraction failed
    pub failed: usize,
}

/// Everything the tasks share
#[derive(Debug)]
struct Shared {
    config: CrawlConfig,
    fetcher: PageFetcher,
    pages: VisitedPages,
    budget: Arc<Semaphore>,
    fetched: AtomicUsize,
    failed: AtomicUsize,
}

/// Handle to one crawl; cloning it is how a task gets access to shared state
#[derive(Debug, Clone)]
pub struct Crawler {
    shared: Arc<Shared>,
}

impl Crawler {
    /// Builds the HTTP client and empty crawl state
    pub fn new(config: CrawlConfig) -> Result<Self, reqwest::Error> {
        let fetcher = PageFetcher::new(&config)?;
        let budget = Arc::new(Semaphore::new(config.max_concurrency));

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                fetcher,
                pages: VisitedPages::new(),
                budget,
                fetched: AtomicUsize::new(0),
                failed: AtomicUsize::new(0),
            }),
        })
    }

    /// Crawls from the base URL until no task is left
    pub async fn run(self) -> CrawlSummary {
        let config = &self.shared.config;
        info!(
            base_url = %config.base_url,
            max_pages = config.max_pages,
            max_concurrency = config.max_concurrency,
            "starting crawl"
        );

        // The JoinSet is the wait barrier: one entry per task still running
        let mut tasks = JoinSet::new();
        self.spawn(&mut tasks, config.base_url.to_string());

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(next_links) => {
                    for link in next_links {
                        self.spawn(&mut tasks, link);
                    }
                }
                Err(e) => warn!(error = %e, "crawl task did not finish"),
            }
        }

        let summary = CrawlSummary {
            pages: self.shared.pages.snapshot(),
            fetched: self.shared.fetched.load(Ordering::SeqCst),
            failed: self.shared.failed.load(Ordering::SeqCst),
        };

        info!(
            pages = self.shared.pages.len(),
            fetched = summary.fetched,
            failed = summary.failed,
            "crawl finished"
        );

        summary
    }

    fn spawn(&self, tasks: &mut JoinSet<Vec<String>>, raw_url: String) {
        let crawler = self.clone();
        tasks.spawn(async move { crawler.crawl_page(raw_url).await });
    }

    // Processes one URL and returns the links that should be crawled next
    async fn crawl_page(&self, raw_url: String) -> Vec<String> {
        let shared = &self.shared;
        let max_pages = shared.config.max_pages;

        // Held until this function returns, on every path
        let _permit = match Arc::clone(&shared.budget).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => return Vec::new(),
        };

        if shared.pages.limit_reached(max_pages) {
            return Vec::new();
        }

        let key = match self.page_key(&raw_url) {
            Ok(key) => key,
            Err(CrawlError::HostMismatch { .. }) => {
                debug!(url = %raw_url, "skipping link to another host");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "skipping link");
                return Vec::new();
            }
        };

        // The ordinal check is the second ceiling gate, made in the same
        // critical section that admitted the page
        match shared.pages.record_visit(&key) {
            Visit::Repeat => return Vec::new(),
            Visit::First { ordinal } if ordinal > max_pages => {
                debug!(url = %raw_url, "page limit reached, not fetching");
                return Vec::new();
            }
            Visit::First { .. } => {}
        }

        info!(url = %raw_url, "crawling");
        shared.fetched.fetch_add(1, Ordering::SeqCst);

        let body = match shared.fetcher.fetch_html(&raw_url).await {
            Ok(body) => body,
            Err(e) => {
                shared.failed.fetch_add(1, Ordering::SeqCst);
                warn!(error = %e, "fetch failed");
                return Vec::new();
            }
        };

        let links = match extract_links(&body, shared.config.base_url.as_str()) {
            Ok(links) => links,
            Err(e) => {
                shared.failed.fetch_add(1, Ordering::SeqCst);
                warn!(url = %raw_url, error = %e, "could not extract links");
                return Vec::new();
            }
        };

        let mut next = Vec::with_capacity(links.len());
        for link in links {
            if shared.pages.limit_reached(max_pages) {
                break;
            }
            next.push(link);
        }
        next
    }

    // Parses the URL, checks it is on our host and returns its normalized key
    fn page_key(&self, raw_url: &str) -> Result<String, CrawlError> {
        let url = Url::parse(raw_url).map_err(|e| CrawlError::invalid_url(raw_url, e))?;

        let expected = &self.shared.config.base_host;
        if host_key(&url).as_deref() != Some(expected.as_str()) {
            return Err(CrawlError::HostMismatch {
                url: raw_url.to_string(),
                expected: expected.clone(),
            });
        }

        normalize_url(raw_url)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a Semaphore?
//    - A counter of available "slots"
//    - acquire_owned().await waits until a slot is free and returns a permit
//    - Dropping the permit gives the slot back, so an early `return` can't
//      leak it
//
// 2. What is JoinSet?
//    - A collection of spawned tasks you can wait on one at a time
//    - join_next() returns None once every task has finished
//    - That makes it our "are we done yet?" counter
//
// 3. Why Arc<Shared>?
//    - Every task needs the same config, client and visited map
//    - Arc lets many owners share one value; cloning it only bumps a counter
//
// 4. Why AtomicUsize for the counters?
//    - fetch_add is a lock-free increment that is safe from many threads
// -----------------------------------------------------------------------------
