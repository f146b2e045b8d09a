// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   site-crawler <BASE_URL> <MAX_CONCURRENCY> <MAX_PAGES> [--json] [--timeout N]
//
// All validation happens here, before anything is crawled: a base URL that
// does not parse, or a count that is not a positive integer, is reported by
// clap together with the usage text.
// =============================================================================

use clap::Parser;
use url::Url;

use crate::config::DEFAULT_TIMEOUT_SECS;

#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Crawl one website and count internal links to each page",
    long_about = "site-crawler visits every page reachable from BASE_URL on the same host, \
                  with at most MAX_CONCURRENCY requests in flight and at most MAX_PAGES \
                  distinct pages, then prints how many internal links point at each page."
)]
pub struct Cli {
    /// Website to crawl (e.g., https://blog.boot.dev)
    #[arg(value_parser = parse_base_url)]
    pub base_url: Url,

    /// Maximum number of pages fetched at the same time
    #[arg(value_parser = parse_positive)]
    pub max_concurrency: usize,

    /// Stop starting new fetches after this many distinct pages
    #[arg(value_parser = parse_positive)]
    pub max_pages: usize,

    /// Output the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds (0 disables the timeout)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header to send
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Log debug output (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

// Accepts only absolute http(s) URLs that have a host
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}', use http or https", url.scheme()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(format!("URL has no host: {}", raw));
    }

    Ok(url)
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("'{}' is not a positive integer: {}", raw, e)),
    }
}
