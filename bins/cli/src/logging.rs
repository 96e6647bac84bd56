//! `tracing` subscriber setup. Logs always go to stderr.

use crate::format::OutputMode;
use pawtrip_config::ENV_LOG;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global subscriber; JSON lines when the output is machine-readable.
pub fn init_tracing(mode: OutputMode) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if mode.is_machine() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = installed {
        eprintln!("warning: logging disabled: {error}");
    }
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
