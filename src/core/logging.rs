//! Tracing setup for the binary
//!
//! Logs go to stderr so table and JSON output on stdout stay pipeable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g. `invm=debug`
pub const LOG_ENV: &str = "INVM_LOG";

/// Default filter directive for the given verbosity flags
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "invm=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global subscriber. `INVM_LOG` wins over the flags.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    // a second init (e.g. from tests) is not an error worth surfacing
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
