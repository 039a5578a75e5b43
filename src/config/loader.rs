//! File loading and merging for hashi configuration.

use anyhow::{Context, Result};
use std::fs;

use super::types::{Config, ProviderConfig, ProviderEntry};

/// Written to `config.toml` on first run.
const DEFAULT_CONFIG_TOML: &str = r#"# default_provider = "openai"
# model = "gpt-4.1"
# system_prompt = "You are a helpful assistant."

[provider.openai]
api_key = "{env:OPENAI_API_KEY}"

[provider.openrouter]
api_key = "{env:OPENROUTER_API_KEY}"

[provider.ollama]
base_url = "http://localhost:11434/v1"
"#;

impl Config {
    /// Loads the global config from `~/.config/hashi/config.toml`.
    ///
    /// If no config file exists, creates one with `{env:VAR}` placeholders
    /// for API keys and returns it.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, DEFAULT_CONFIG_TOML)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            return Self::parse(DEFAULT_CONFIG_TOML)
                .with_context(|| "Failed to parse default config".to_string());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    /// Look for hashi.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                let contents = fs::read_to_string(&candidate)?;
                let config = Self::parse(&contents)
                    .with_context(|| format!("Failed to parse config at {:?}", candidate))?;
                return Ok(Some(config));
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parses a TOML document into a [`Config`].
    pub(super) fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Merge project config over global config.
    /// Project values win when present, field by field.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            model: project.model.or(global.model),
            default_provider: project.default_provider.or(global.default_provider),
            system_prompt: project.system_prompt.or(global.system_prompt),
            provider: ProviderConfig {
                openai: merge_entry(global.provider.openai, project.provider.openai),
                openrouter: merge_entry(global.provider.openrouter, project.provider.openrouter),
                ollama: merge_entry(global.provider.ollama, project.provider.ollama),
            },
        }
    }
}

fn merge_entry(
    global: Option<ProviderEntry>,
    project: Option<ProviderEntry>,
) -> Option<ProviderEntry> {
    match (global, project) {
        (Some(g), Some(p)) => Some(ProviderEntry {
            api_key: p.api_key.or(g.api_key),
            base_url: p.base_url.or(g.base_url),
            model: p.model.or(g.model),
        }),
        (g, p) => p.or(g),
    }
}
