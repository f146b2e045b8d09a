// src/logging.rs
// =============================================================================
// Sets up `tracing` output.
//
// Log lines go to stderr so stdout only ever carries the report (which keeps
// `--json` output pipeable). The level comes from RUST_LOG when it is set,
// e.g. `RUST_LOG=site_crawler=debug,reqwest=warn`; otherwise `info`, or
// `debug` with --verbose.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (e.g. from tests) finds a subscriber already installed
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
