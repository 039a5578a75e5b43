//! Provider kind enumeration and per-provider defaults.
//!
//! Every supported provider speaks the OpenAI-compatible chat-completions
//! API; the kind only decides the default endpoint, model and key lookup.

use anyhow::{anyhow, Result};

use crate::constants;

/// Identifies which LLM provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// OpenAI (GPT models).
    OpenAI,
    /// OpenRouter (multi-provider gateway).
    OpenRouter,
    /// Ollama (local models via OpenAI-compatible API).
    Ollama,
}

impl ProviderKind {
    /// Parses a provider name string into a [`ProviderKind`].
    ///
    /// Matching is case-insensitive. Returns an error for unknown providers.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "openrouter" => Ok(Self::OpenRouter),
            "ollama" => Ok(Self::Ollama),
            other => Err(anyhow!(
                "Unknown provider: {other}. Supported: openai, openrouter, ollama"
            )),
        }
    }

    /// Lowercase name used in config tables and `<NAME>_API_KEY` lookups.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::OpenRouter => "openrouter",
            Self::Ollama => "ollama",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => constants::OPENAI_DEFAULT_BASE_URL,
            Self::OpenRouter => constants::OPENROUTER_DEFAULT_BASE_URL,
            Self::Ollama => constants::OLLAMA_DEFAULT_BASE_URL,
        }
    }

    /// Local Ollama accepts unauthenticated requests.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }
}

/// Returns the default model identifier for a given provider.
pub fn default_model_for(provider: &ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenAI => constants::DEFAULT_OPENAI_MODEL,
        ProviderKind::OpenRouter => constants::DEFAULT_OPENROUTER_MODEL,
        ProviderKind::Ollama => constants::OLLAMA_DEFAULT_MODEL,
    }
}
