//! OpenAI-compatible chat-completions client.
//!
//! Contains [`OpenAiClient`], the [`CompletionProvider`] used at runtime.
//! OpenAI, OpenRouter and Ollama all accept the same streaming request, so
//! one client covers every [`ProviderKind`](super::ProviderKind).

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::error::ProviderError;
use super::resolve::ModelSelection;
use super::sse;
use super::wire::ChatCompletionRequest;
use super::{CompletionProvider, FragmentStream};
use crate::config::Config;
use crate::message::Message;
use crate::tools::ToolSchema;

/// A configured provider ready to stream completions.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            model: model.into(),
        }
    }

    /// Creates a client from the loaded config and resolved selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected provider needs an API key and none
    /// is set in the environment or config.
    pub fn from_config(config: &Config, selection: &ModelSelection) -> Result<Self> {
        let name = selection.provider.name();
        let api_key = config.resolve_api_key(name);
        if selection.provider.requires_api_key() && api_key.is_none() {
            anyhow::bail!(
                "No API key found for {name}. Set {}_API_KEY or configure it in config.toml",
                name.to_uppercase()
            );
        }
        Ok(Self::new(&selection.base_url, api_key, &selection.model))
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn stream_completion(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
    ) -> Result<FragmentStream, ProviderError> {
        let body = ChatCompletionRequest::streaming(&self.model, messages, tools);
        let url = self.completions_url();
        debug!(
            %url,
            model = %self.model,
            messages = messages.len(),
            tools = tools.map_or(0, |t| t.len()),
            "opening completion stream"
        );

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(sse::fragments(response.bytes_stream()))
    }
}
