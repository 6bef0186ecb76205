//! Logging utilities
//!
//! Installs the `tracing` subscriber used by the binary and exposes the small
//! helpers the client uses to keep credentials out of log lines.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map a `-v` count to a default level. `RUST_LOG` takes precedence when set.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let default_level = level_for_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Mask a secret for display, keeping only its length visible
pub fn redact(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        format!("[REDACTED; {} chars]", secret.chars().count())
    }
}
