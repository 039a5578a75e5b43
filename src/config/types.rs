//! Struct definitions and serde defaults for hashi configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for hashi, deserialized from `config.toml`.
///
/// Every field is optional so hashi runs with provider defaults when no
/// config file exists.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Model identifier. `None` means the selected provider's default.
    #[serde(default)]
    pub model: Option<String>,
    /// Default provider name (`openai`, `openrouter`, `ollama`).
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Optional system prompt placed at the head of every session.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Provider-specific configuration map.
///
/// Each field corresponds to a supported OpenAI-compatible provider. Only
/// providers the user has configured will be `Some`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    /// Configuration for the OpenAI API provider.
    pub openai: Option<ProviderEntry>,
    /// Configuration for the OpenRouter API provider.
    pub openrouter: Option<ProviderEntry>,
    /// Configuration for the local Ollama provider.
    pub ollama: Option<ProviderEntry>,
}

/// Connection details for a single LLM provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderEntry {
    /// API key for authentication. Can also be set via environment variables.
    pub api_key: Option<String>,
    /// Custom base URL (useful for proxies or self-hosted gateways).
    pub base_url: Option<String>,
    /// Model identifier to use with this provider, overriding the global default.
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Returns the entry for a provider by its lowercase name.
    pub fn entry(&self, provider: &str) -> Option<&ProviderEntry> {
        match provider {
            "openai" => self.openai.as_ref(),
            "openrouter" => self.openrouter.as_ref(),
            "ollama" => self.ollama.as_ref(),
            _ => None,
        }
    }

    /// Returns a mutable entry for a provider, creating an empty one if needed.
    pub(super) fn entry_mut(&mut self, provider: &str) -> Option<&mut ProviderEntry> {
        let slot = match provider {
            "openai" => &mut self.openai,
            "openrouter" => &mut self.openrouter,
            "ollama" => &mut self.ollama,
            _ => return None,
        };
        Some(slot.get_or_insert_with(ProviderEntry::default))
    }
}
