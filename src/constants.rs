//! Centralized constants for hashi.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "hashi";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "hashi.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "chat_history.txt";

/// Input line that ends the interactive session.
pub const QUIT_COMMAND: &str = "quit";

// --- Logging ---

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "HASHI_LOG";

/// Filter used when `HASHI_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// --- Provider defaults ---

/// Default provider when none is configured.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Default LLM model identifier for OpenAI.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1";

/// Default LLM model identifier for OpenRouter.
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4.1-mini";

/// Default LLM model identifier for Ollama.
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3.1";

/// Default base URL for the OpenAI API.
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default base URL for the OpenRouter API.
pub const OPENROUTER_DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default base URL for a local Ollama server (OpenAI-compatible endpoint).
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Environment variable overriding the provider base URL.
pub const BASE_URL_ENV_VAR: &str = "BASE_URL";

/// Environment variable overriding the model identifier.
pub const MODEL_ENV_VAR: &str = "MODEL";

// --- Tool server launch ---

/// Interpreter used for `.py` tool server scripts.
pub const PYTHON_COMMAND: &str = "python";

/// Interpreter used for `.js` tool server scripts.
pub const NODE_COMMAND: &str = "node";
