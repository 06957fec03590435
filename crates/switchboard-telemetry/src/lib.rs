//! Logging for Switchboard
//!
//! Installs a `tracing-subscriber` that writes to stderr, so stdout stays
//! free for the MCP stdio transport.

use switchboard_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter
const FILTER_ENV: &str = "RUST_LOG";

/// Initialize logging from configuration
///
/// `RUST_LOG` takes precedence over the configured filter. An invalid
/// filter falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let (filter, rejected) = build_filter(&config.filter);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    if let Some(directives) = rejected {
        tracing::warn!(%directives, "invalid log filter, falling back to info");
    }
    tracing::debug!(format = ?config.format, "logging initialized");

    Ok(())
}

/// Resolve the effective log filter
///
/// Also returns the directives that failed to parse, if any, so they can be
/// reported once the subscriber is live.
fn build_filter(configured: &str) -> (EnvFilter, Option<String>) {
    let directives = std::env::var(FILTER_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_owned());

    match EnvFilter::try_new(&directives) {
        Ok(filter) => (filter, None),
        Err(_) => (EnvFilter::new("info"), Some(directives)),
    }
}
