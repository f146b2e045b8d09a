// src/page/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which tolerates broken markup the way browsers do
//
// Relative hrefs are resolved against the base URL with the `url` crate.
// Links are returned in document order and are NOT filtered: cross-host
// links, mailto: links and duplicates all come back. Deciding what to crawl
// is the engine's job.
// =============================================================================

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::CrawlError;

// Extracts all anchor links from HTML content
//
// Parameters:
//   html: the HTML body to parse
//   base_url: the URL relative hrefs are resolved against
//
// Returns: absolute URLs in the order their anchors appear
//
// Example:
//   html = "<a href='/path/one'>One</a>"
//   base_url = "https://blog.boot.dev"
//   result = ["https://blog.boot.dev/path/one"]
pub fn extract_links(html: &str, base_url: &str) -> Result<Vec<String>, CrawlError> {
    let base = Url::parse(base_url).map_err(|e| CrawlError::invalid_url(base_url, e))?;

    let selector = Selector::parse("a[href]").map_err(|e| CrawlError::Parse(e.to_string()))?;

    // html5ever never rejects a document outright, broken markup is repaired
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    for element in document.select(&selector) {
        // The parser keeps only the first of duplicated attributes
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_href(&base, href) {
            Some(url) => links.push(url),
            None => debug!(href, "skipping malformed href"),
        }
    }

    Ok(links)
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples (base = "https://blog.boot.dev"):
//   "/path/one"                 -> "https://blog.boot.dev/path/one"
//   "path/one"                  -> "https://blog.boot.dev/path/one"
//   "https://other.com/path"    -> "https://other.com/path"
//   "http://[bad"               -> None
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    // join() handles both cases: an absolute href replaces the base entirely
    base.join(href).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://blog.boot.dev";

    #[test]
    fn test_absolute_and_relative_urls() {
        let html = r#"
            <html>
                <body>
                    <a href="/path/one"><span>Boot.dev</span></a>
                    <a href="https://other.com/path/one"><span>Boot.dev</span></a>
                </body>
            </html>
        "#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(
            links,
            vec!["https://blog.boot.dev/path/one", "https://other.com/path/one"]
        );
    }

    #[test]
    fn test_nested_anchors_in_document_order() {
        let html = r#"
            <html>
                <body>
                    <span> </span>
                    <div>
                        <a href="/path/one"><span>Boot.dev</span></a>
                    </div>
                    <span> </span>
                    <a href="https://other.com/path/one"><span>Boot.dev</span></a>
                </body>
            </html>
        "#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(
            links,
            vec!["https://blog.boot.dev/path/one", "https://other.com/path/one"]
        );
    }

    #[test]
    fn test_no_anchors() {
        let html = r#"
            <html>
                <body>
                    <span> </span>
                    <div></div>
                </body>
            </html>
        "#;
        assert!(extract_links(html, BASE).unwrap().is_empty());
    }

    #[test]
    fn test_fragment_without_html_wrapper() {
        let html = r#"
            <a href="/path/one"><span>Boot.dev</span></a>
            <a href="https://other.com/path/one"><span>Boot.dev</span></a>
        "#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], "https://blog.boot.dev/path/one");
    }

    #[test]
    fn test_equivalent_hrefs_resolve_identically() {
        let html = r#"
            <a href="/path/one">a</a>
            <a href="path/one">b</a>
            <a href="./path/one">c</a>
            <a href="https://blog.boot.dev/path/one">d</a>
        "#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(links.len(), 4);
        assert!(links.iter().all(|l| l == "https://blog.boot.dev/path/one"));
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<a name="top">Top</a><a href="/kept">Kept</a>"#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(links, vec!["https://blog.boot.dev/kept"]);
    }

    #[test]
    fn test_first_href_wins() {
        let html = r#"<a href="/first" href="/second">x</a>"#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(links, vec!["https://blog.boot.dev/first"]);
    }

    #[test]
    fn test_malformed_href_does_not_abort() {
        let html = r#"
            <a href="http://[not-an-ip">bad</a>
            <a href="/good">good</a>
        "#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(links, vec!["https://blog.boot.dev/good"]);
    }

    #[test]
    fn test_broken_markup_is_tolerated() {
        let html = r#"<div><p><a href="/one">unclosed <b>tags<a href="/two">"#;
        let links = extract_links(html, BASE).unwrap();
        assert_eq!(
            links,
            vec!["https://blog.boot.dev/one", "https://blog.boot.dev/two"]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = extract_links("<a href='/x'>x</a>", "not a url");
        assert!(matches!(result, Err(CrawlError::InvalidUrl { .. })));
    }
}
