use serde::Deserialize;

/// Path served when none is configured
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Liveness endpoint reporting `{"status": "ok", "port": ...}`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    /// Serve the endpoint at all
    pub enabled: bool,
    /// Route path; must start with `/`
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_HEALTH_PATH.to_owned(),
        }
    }
}
