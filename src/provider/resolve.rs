//! Model resolution logic for hashi.
//!
//! Resolves which provider, endpoint and model to use from the loaded
//! config (environment overrides already applied) and hardcoded defaults.

use anyhow::Result;

use super::kind::{default_model_for, ProviderKind};
use crate::config::Config;
use crate::constants::DEFAULT_PROVIDER;

/// Resolved provider, endpoint and model.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    pub provider: ProviderKind,
    pub model: String,
    pub base_url: String,
}

/// Resolve which provider and model to use.
/// Priority: environment > config files > provider defaults.
pub fn resolve_model(config: &Config) -> Result<ModelSelection> {
    let provider_str = config.provider_name().unwrap_or(DEFAULT_PROVIDER);
    let provider = ProviderKind::from_str(provider_str)?;

    let model = config
        .model_name(provider.name())
        .unwrap_or_else(|| default_model_for(&provider).to_string());

    let base_url = config
        .base_url_for(provider.name())
        .unwrap_or_else(|| provider.default_base_url().to_string());

    Ok(ModelSelection {
        provider,
        model,
        base_url,
    })
}
