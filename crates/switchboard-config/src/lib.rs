#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod providers;
pub mod server;
pub mod streaming;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use providers::*;
pub use server::*;
pub use streaming::*;
pub use telemetry::*;

/// Top-level Switchboard configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream provider configuration
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Pseudo-streaming configuration
    #[serde(default)]
    pub streaming: StreamingConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
