//! Logging setup for the CLI using `tracing` and `tracing-subscriber`.
//!
//! Merge diagnostics go to stderr so they never mix with table output.
//! `RUST_LOG` overrides the default filter.

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once at startup.
pub fn init_logging(level: Level) {
    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG` env var.
fn build_env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // External crates stay at warn level to reduce noise
        EnvFilter::new(format!(
            "warn,rowmerge={level},rowmerge_core={level}",
            level = level_str
        ))
    })
}
