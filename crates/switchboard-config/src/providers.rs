use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use url::Url;

/// Default primary (Anthropic) model
pub const DEFAULT_PRIMARY_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default secondary (`OpenAI`) model
pub const DEFAULT_SECONDARY_MODEL: &str = "gpt-3.5-turbo";

/// Upstream providers, in fixed fallback order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// Preferred provider (Anthropic Messages API)
    #[serde(default)]
    pub primary: PrimaryProviderConfig,
    /// Fallback provider (`OpenAI` Chat Completions API)
    #[serde(default)]
    pub secondary: SecondaryProviderConfig,
}

/// Configuration for the primary provider
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimaryProviderConfig {
    /// Availability flag; accepts a boolean or a case-insensitive `"true"` string
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    pub enabled: bool,
    /// API key for authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Model used when the request does not name one
    #[serde(default = "default_primary_model")]
    pub model: String,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Request timeout in seconds
    #[serde(default = "default_primary_timeout")]
    pub timeout_seconds: u64,
}

impl Default for PrimaryProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            model: default_primary_model(),
            base_url: None,
            timeout_seconds: default_primary_timeout(),
        }
    }
}

impl PrimaryProviderConfig {
    /// API key, treating an empty string as absent
    pub fn configured_api_key(&self) -> Option<&SecretString> {
        non_empty(self.api_key.as_ref())
    }

    /// Whether the provider is enabled and holds credentials
    pub fn is_available(&self) -> bool {
        self.enabled && self.configured_api_key().is_some()
    }
}

/// Configuration for the secondary provider
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecondaryProviderConfig {
    /// API key for authentication; absent or empty disables the provider
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Model sent upstream for every request
    #[serde(default = "default_secondary_model")]
    pub model: String,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Request timeout in seconds
    #[serde(default = "default_secondary_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SecondaryProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_secondary_model(),
            base_url: None,
            timeout_seconds: default_secondary_timeout(),
        }
    }
}

impl SecondaryProviderConfig {
    /// API key, treating an empty string as absent
    pub fn configured_api_key(&self) -> Option<&SecretString> {
        non_empty(self.api_key.as_ref())
    }

    /// Whether the provider holds credentials
    pub fn is_available(&self) -> bool {
        self.configured_api_key().is_some()
    }
}

fn non_empty(key: Option<&SecretString>) -> Option<&SecretString> {
    key.filter(|k| !k.expose_secret().trim().is_empty())
}

/// Accept `true`/`false` or any string, where only `"true"` (any case) is true
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => text.trim().eq_ignore_ascii_case("true"),
    })
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

fn default_primary_model() -> String {
    DEFAULT_PRIMARY_MODEL.to_string()
}

fn default_secondary_model() -> String {
    DEFAULT_SECONDARY_MODEL.to_string()
}

const fn default_primary_timeout() -> u64 {
    60
}

const fn default_secondary_timeout() -> u64 {
    30
}
