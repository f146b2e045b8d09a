// src/page/normalize.rs
// =============================================================================
// Turns a URL into the key we use to decide whether two links point at the
// same page.
//
// A key looks like `blog.boot.dev/path/one`:
// - no scheme (http and https count as the same page)
// - host is lower-cased by the `url` parser, port kept only when non-default
// - path cleaned: `.`/`..` segments resolved, repeated and trailing `/` removed
// - query string and fragment dropped
//
// Scheme-less input such as an existing key is read as if it started with
// `http://`, so normalizing a key gives back the same key.
// =============================================================================

use url::{ParseError, Url};

use crate::error::CrawlError;

// Normalizes a raw URL string into its deduplication key
//
// Examples:
//   "https://blog.boot.dev/path/"      -> "blog.boot.dev/path"
//   "http://BLOG.boot.dev/a/../b?x=1"  -> "blog.boot.dev/b"
//   "https://blog.boot.dev/"           -> "blog.boot.dev"
pub fn normalize_url(raw: &str) -> Result<String, CrawlError> {
    let parsed = parse_lenient(raw)?;

    let host = host_key(&parsed).ok_or_else(|| CrawlError::Normalize {
        url: raw.to_string(),
        reason: "URL has no host".to_string(),
    })?;

    let path = clean_path(parsed.path());
    if path == "/" {
        Ok(host)
    } else {
        Ok(format!("{}{}", host, path))
    }
}

// Returns `host` or `host:port` for a parsed URL
//
// The `url` crate already drops default ports (80 for http, 443 for https),
// so `port()` is only Some when the port actually matters.
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

fn parse_lenient(raw: &str) -> Result<Url, CrawlError> {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        // "localhost:3000/b" parses as scheme "localhost" with path "3000/b"
        Ok(url) if url.cannot_be_a_base() && starts_with_port(url.path()) => {
            Url::parse(&format!("http://{}", trimmed))
                .map_err(|e| CrawlError::invalid_url(raw, e))
        }
        Ok(url) => Ok(url),
        Err(ParseError::RelativeUrlWithoutBase) => {
            // "/path" has no host to fall back on
            if trimmed.starts_with('/') {
                return Err(CrawlError::invalid_url(raw, "relative URL without a host"));
            }
            Url::parse(&format!("http://{}", trimmed))
                .map_err(|e| CrawlError::invalid_url(raw, e))
        }
        Err(e) => Err(CrawlError::invalid_url(raw, e)),
    }
}

fn starts_with_port(path: &str) -> bool {
    let digits = path.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && matches!(path.as_bytes().get(digits), None | Some(b'/'))
}

// Lexically cleans a URL path, the way a filesystem path would be cleaned
//
// Empty and "." segments vanish, ".." removes the previous segment (never
// climbing above the root). Always returns a path starting with "/".
fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}
