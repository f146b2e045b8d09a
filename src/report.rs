// src/report.rs
// =============================================================================
// Turns the final visit counts into something a human (or a script) can read.
//
// Pages are sorted by ascending reference count; pages with the same count
// are sorted by their normalized URL so the output is stable between runs.
// =============================================================================

use std::collections::HashMap;

use serde::Serialize;

use crate::crawl::CrawlSummary;

const BANNER: &str = "=============================";

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCount {
    /// Normalized URL (host + path)
    pub url: String,
    /// How many internal links pointed at it
    pub count: usize,
}

/// Sorted crawl results
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub base_url: String,
    pub pages: Vec<PageCount>,
    pub fetched: usize,
    pub failed: usize,
}

impl Report {
    /// Sorts the visit counts into report order
    pub fn new(pages: &HashMap<String, usize>, base_url: &str) -> Self {
        let mut sorted: Vec<PageCount> = pages
            .iter()
            .map(|(url, count)| PageCount {
                url: url.clone(),
                count: *count,
            })
            .collect();

        sorted.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.url.cmp(&b.url)));

        Self {
            base_url: base_url.to_string(),
            pages: sorted,
            fetched: 0,
            failed: 0,
        }
    }

    pub fn from_summary(summary: &CrawlSummary, base_url: &str) -> Self {
        Self {
            fetched: summary.fetched,
            failed: summary.failed,
            ..Self::new(&summary.pages, base_url)
        }
    }

    /// One formatted line per page, in report order
    pub fn lines(&self) -> Vec<String> {
        self.pages
            .iter()
            .map(|page| format!("Found {} internal links to {}", page.count, page.url))
            .collect()
    }

    /// Full text report with header and footer banners
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(BANNER);
        out.push('\n');
        out.push_str(&format!("  REPORT for {}\n", self.base_url));
        out.push_str(BANNER);
        out.push('\n');

        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }

        out.push_str(BANNER);
        out.push('\n');
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, usize)]) -> HashMap<String, usize> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_sorted_by_count_then_url() {
        let pages = counts(&[
            ("site.dev/zeta", 1),
            ("site.dev", 5),
            ("site.dev/beta", 3),
            ("site.dev/alpha", 3),
            ("site.dev/about", 1),
        ]);
        let report = Report::new(&pages, "https://site.dev");

        let order: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "site.dev/about",
                "site.dev/zeta",
                "site.dev/alpha",
                "site.dev/beta",
                "site.dev",
            ]
        );
    }

    #[test]
    fn test_lines_format() {
        let pages = counts(&[("site.dev/b", 2), ("site.dev/a", 1)]);
        let report = Report::new(&pages, "https://site.dev");
        assert_eq!(
            report.lines(),
            vec![
                "Found 1 internal links to site.dev/a",
                "Found 2 internal links to site.dev/b",
            ]
        );
    }

    #[test]
    fn test_render_has_banners() {
        let pages = counts(&[("site.dev", 1)]);
        let rendered = Report::new(&pages, "https://site.dev").render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[1], "  REPORT for https://site.dev");
        assert_eq!(lines[2], BANNER);
        assert_eq!(lines[3], "Found 1 internal links to site.dev");
        assert_eq!(lines[4], BANNER);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new(&HashMap::new(), "https://site.dev");
        assert!(report.lines().is_empty());
        assert_eq!(report.render().lines().count(), 4);
    }

    #[test]
    fn test_json_output() {
        let summary = CrawlSummary {
            pages: counts(&[("site.dev", 2)]),
            fetched: 1,
            failed: 0,
        };
        let json = Report::from_summary(&summary, "https://site.dev/")
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["base_url"], "https://site.dev/");
        assert_eq!(value["pages"][0]["url"], "site.dev");
        assert_eq!(value["pages"][0]["count"], 2);
        assert_eq!(value["fetched"], 1);
    }
}
