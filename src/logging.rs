//! Console logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the `--log-level` flag decides, with
//! serenity's own output capped at `warn`.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Directives used when `RUST_LOG` is not set
pub fn default_directives(level: &str) -> String {
    format!("{},serenity=warn", level.trim().to_lowercase())
}

/// Build the filter from `RUST_LOG`, falling back to `level`
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true),
        )
        .with(build_filter(level))
        .init();
}
