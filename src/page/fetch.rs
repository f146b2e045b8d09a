// src/page/fetch.rs
// =============================================================================
// Downloads a page and hands back its HTML.
//
// A fetch fails when:
// - the request itself fails (DNS, connection refused, timeout...)
// - the server answers with a 4xx or 5xx status
// - the Content-Type header is missing or does not mention text/html
//
// There are no retries. Redirects are followed by reqwest's default policy.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::CrawlConfig;
use crate::error::CrawlError;

/// Thin wrapper around a shared reqwest client
///
/// Client is cheap to clone (it's an Arc internally), so every crawl task
/// can hold one and all of them share the same connection pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Builds the HTTP client from the crawl settings
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// GETs `url` and returns the body if it is an HTML page
    pub async fn fetch_html(&self, url: &str) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlError::fetch(url, e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(CrawlError::fetch(url, format!("HTTP {}", status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if !content_type.contains("text/html") {
            return Err(CrawlError::fetch(
                url,
                format!("non text/html content type: '{}'", content_type),
            ));
        }

        response.text().await.map_err(|e| CrawlError::fetch(url, e))
    }
}
