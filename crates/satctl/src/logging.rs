//! Logging setup for satctl
//!
//! Diagnostics go to stderr so stdout stays clean for fact sheets and JSON.
//! Filter: $SATCTL_LOG, else warn / info (-v) / debug (-vv).

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env("SATCTL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
