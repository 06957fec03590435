use std::time::Duration;

use serde::Deserialize;

/// Pseudo-streaming configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamingConfig {
    /// Delay between consecutive stream events, in milliseconds
    #[serde(default = "default_cadence_ms")]
    pub cadence_ms: u64,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            cadence_ms: default_cadence_ms(),
        }
    }
}

impl StreamingConfig {
    /// Delay between consecutive stream events
    pub const fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }
}

const fn default_cadence_ms() -> u64 {
    20
}
