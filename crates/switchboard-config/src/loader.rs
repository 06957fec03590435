use std::path::Path;

use crate::Config;

/// Configuration template bound to the process environment
const DEFAULT_TEMPLATE: &str = include_str!("default.toml");

/// Upper bound for the pseudo-stream cadence
const MAX_CADENCE_MS: u64 = 1_000;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Build configuration from the built-in template and the environment
    ///
    /// Honors `CLAUDE_CODE_AVAILABLE`, `ANTHROPIC_API_KEY`, `CLAUDE_MODEL`,
    /// `OPENAI_API_KEY` and `OPENAI_MODEL`.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment value produces invalid TOML or
    /// fails validation
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_toml_str(DEFAULT_TEMPLATE)
    }

    /// Expand, parse and validate raw TOML
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a provider model is blank, a timeout is zero,
    /// or the stream cadence is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_providers()?;
        self.validate_streaming()?;
        Ok(())
    }

    fn validate_providers(&self) -> anyhow::Result<()> {
        let primary = &self.providers.primary;
        let secondary = &self.providers.secondary;

        if primary.model.trim().is_empty() {
            anyhow::bail!("providers.primary.model must not be empty");
        }
        if secondary.model.trim().is_empty() {
            anyhow::bail!("providers.secondary.model must not be empty");
        }
        if primary.timeout_seconds == 0 || secondary.timeout_seconds == 0 {
            anyhow::bail!("provider timeout_seconds must be greater than 0");
        }

        Ok(())
    }

    fn validate_streaming(&self) -> anyhow::Result<()> {
        if self.streaming.cadence_ms > MAX_CADENCE_MS {
            anyhow::bail!("streaming.cadence_ms must not exceed {MAX_CADENCE_MS}");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }
}
