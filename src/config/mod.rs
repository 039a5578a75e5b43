//! Configuration types and path resolution for hashi.
//!
//! hashi stores its settings as TOML at the platform's XDG config path
//! (e.g. `~/.config/hashi/config.toml` on Linux). A per-project `hashi.toml`
//! and the `MODEL` / `BASE_URL` / `*_API_KEY` environment variables layer on top.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Config;
#[allow(unused_imports)]
pub use types::{ProviderConfig, ProviderEntry};

use anyhow::Result;

impl Config {
    /// Load config with precedence: environment > project > global > defaults.
    /// Creates a default global config file if none exists.
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project()?;

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.resolve_substitutions();
        config.apply_env_overrides();
        Ok(config)
    }
}
