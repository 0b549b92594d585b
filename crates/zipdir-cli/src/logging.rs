//! Diagnostic logging setup.
//!
//! Logs go to stderr. `RUST_LOG` wins when set; otherwise the level follows
//! the output flags. JSON mode logs nothing by default so that stderr holds
//! only the error document.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Returns the filter directive used when `RUST_LOG` is unset.
pub const fn default_directive(verbose: bool, quiet: bool, json: bool) -> &'static str {
    if json {
        "off"
    } else if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs the global `tracing` subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbose: bool, quiet: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet, json)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
