// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the crawl configuration
// 3. Crawl the site
// 4. Print the report
// 5. Exit with proper code (0 = success, 1 = bad arguments, 2 = error)
// =============================================================================

mod cli;     // src/cli.rs - command-line parsing
mod config;  // src/config.rs - immutable crawl settings
mod crawl;   // src/crawl/ - the concurrent crawl engine
mod error;   // src/error.rs - crawl error types
mod logging; // src/logging.rs - tracing setup
mod page;    // src/page/ - fetching, link extraction, URL normalization
mod report;  // src/report.rs - sorted output

use std::time::Duration;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use cli::Cli;
use config::CrawlConfig;
use crawl::Crawler;
use report::Report;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = crawl completed and report printed
//   Ok(1) = invalid command-line arguments, nothing crawled
//   Err   = unexpected error
async fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(0);
        }
        Err(e) => {
            // clap's message already includes the usage line
            e.print()?;
            return Ok(1);
        }
    };

    logging::init_logging(cli.verbose);

    let timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));
    let mut config = match CrawlConfig::new(cli.base_url.clone(), cli.max_concurrency, cli.max_pages) {
        Ok(config) => config.with_timeout(timeout),
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(1);
        }
    };
    if let Some(user_agent) = cli.user_agent {
        config = config.with_user_agent(user_agent);
    }

    let crawler = Crawler::new(config).context("failed to build HTTP client")?;
    let summary = crawler.run().await;

    let report = Report::from_summary(&summary, cli.base_url.as_str());
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render());
    }

    Ok(0)
}
