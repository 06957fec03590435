//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use switchboard_config::{Config, CorsConfig, HealthConfig, ServerConfig, StreamingConfig};

/// Builder for constructing test configurations
///
/// Starts with both providers unconfigured and no stream cadence.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        let mut config = Config {
            server: ServerConfig {
                listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                health: HealthConfig::default(),
                cors: CorsConfig::default(),
            },
            streaming: StreamingConfig { cadence_ms: 0 },
            ..Config::default()
        };
        config.providers.primary.api_key = None;
        config.providers.secondary.api_key = None;

        Self { config }
    }

    /// Point the primary (Anthropic) provider at a mock backend
    pub fn with_primary(mut self, base_url: &str) -> Self {
        let primary = &mut self.config.providers.primary;
        primary.enabled = true;
        primary.api_key = Some(SecretString::from("test-anthropic-key"));
        primary.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Point the secondary (`OpenAI`) provider at a mock backend
    pub fn with_secondary(mut self, base_url: &str) -> Self {
        let secondary = &mut self.config.providers.secondary;
        secondary.api_key = Some(SecretString::from("test-openai-key"));
        secondary.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Keep the primary's key but switch the provider off
    pub fn disable_primary(mut self) -> Self {
        self.config.providers.primary.enabled = false;
        self
    }

    /// Set the secondary's configured model
    pub fn with_secondary_model(mut self, model: &str) -> Self {
        model.clone_into(&mut self.config.providers.secondary.model);
        self
    }

    /// Set the delay between stream events
    pub const fn with_cadence_ms(mut self, cadence_ms: u64) -> Self {
        self.config.streaming.cadence_ms = cadence_ms;
        self
    }

    /// Set the advertised listen address
    pub const fn with_listen_address(mut self, address: SocketAddr) -> Self {
        self.config.server.listen_address = Some(address);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
