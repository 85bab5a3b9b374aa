//! Command-line interface for playing and for driving the asset cache worker

pub mod commands;
pub mod config;
pub mod output;

use tracing_subscriber::EnvFilter;

/// Install the global log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "noughts=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
