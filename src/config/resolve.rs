//! Environment variable substitution, overrides and API key resolution.

use super::types::{Config, ProviderEntry};
use crate::constants::{BASE_URL_ENV_VAR, MODEL_ENV_VAR};

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        for field in [
            &mut self.model,
            &mut self.system_prompt,
            &mut self.default_provider,
        ] {
            if let Some(value) = field {
                *value = Self::resolve_str(value);
            }
        }
        Self::resolve_provider_entry(&mut self.provider.openai);
        Self::resolve_provider_entry(&mut self.provider.openrouter);
        Self::resolve_provider_entry(&mut self.provider.ollama);
    }

    /// Resolves `{env:VAR}` patterns in a single provider entry.
    fn resolve_provider_entry(entry: &mut Option<ProviderEntry>) {
        if let Some(ref mut e) = entry {
            for field in [&mut e.api_key, &mut e.base_url, &mut e.model] {
                if let Some(value) = field {
                    *value = Self::resolve_str(value);
                }
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    ///
    /// Substituted values are copied verbatim and never scanned again, so a
    /// value that itself contains `{env:...}` is left as is.
    fn resolve_str(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(start) = rest.find("{env:") {
            let Some(end) = rest[start..].find('}') else {
                break;
            };
            let var_name = &rest[start + 5..start + end];
            result.push_str(&rest[..start]);
            result.push_str(&std::env::var(var_name).unwrap_or_default());
            rest = &rest[start + end + 1..];
        }
        result.push_str(rest);
        result
    }

    /// Applies `MODEL` and `BASE_URL` from the environment.
    ///
    /// `BASE_URL` is stored on the entry of the configured default provider.
    pub(super) fn apply_env_overrides(&mut self) {
        if let Some(model) = non_empty_env(MODEL_ENV_VAR) {
            self.model = Some(model);
        }
        if let Some(base_url) = non_empty_env(BASE_URL_ENV_VAR) {
            let provider = self
                .provider_name()
                .unwrap_or(crate::constants::DEFAULT_PROVIDER)
                .to_lowercase();
            if let Some(entry) = self.provider.entry_mut(&provider) {
                entry.base_url = Some(base_url);
            }
        }
    }

    /// Resolve API key for a provider: env var first, then config value.
    ///
    /// Empty strings (e.g. an unset `{env:VAR}` placeholder) count as absent.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        let env_key = format!("{}_API_KEY", provider.to_uppercase());
        if let Some(val) = non_empty_env(&env_key) {
            return Some(val);
        }

        self.provider
            .entry(provider)
            .and_then(|e| e.api_key.clone())
            .filter(|k| !k.is_empty())
    }

    /// Configured base URL for a provider, if any.
    pub fn base_url_for(&self, provider: &str) -> Option<String> {
        self.provider
            .entry(provider)
            .and_then(|e| e.base_url.clone())
            .filter(|u| !u.is_empty())
    }

    /// Get the configured default provider name, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.default_provider.as_deref().filter(|p| !p.is_empty())
    }

    /// Model from config: global `model` first, then the provider entry's.
    pub fn model_name(&self, provider: &str) -> Option<String> {
        self.model
            .clone()
            .or_else(|| self.provider.entry(provider).and_then(|e| e.model.clone()))
            .filter(|m| !m.is_empty())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
