//! LLM provider boundary for hashi.
//!
//! The rest of the crate sees a provider only through [`CompletionProvider`]:
//! hand it a conversation and an optional tool schema list, get back a stream
//! of [`Fragment`]s. [`OpenAiClient`] implements it for any OpenAI-compatible
//! chat-completions endpoint (OpenAI, OpenRouter, Ollama) via [`ProviderKind`].

mod client;
mod error;
mod fragment;
mod kind;
mod resolve;
mod sse;
mod wire;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::message::Message;
use crate::tools::ToolSchema;

pub use client::OpenAiClient;
pub use error::ProviderError;
pub use fragment::{FinishReason, Fragment, ToolCallDelta};
#[allow(unused_imports)]
pub use kind::{default_model_for, ProviderKind};
pub use resolve::{resolve_model, ModelSelection};

/// Lazy, finite sequence of fragments from one streaming completion.
pub type FragmentStream = BoxStream<'static, Result<Fragment, ProviderError>>;

/// A model-completion provider that streams its responses.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Opens a streaming completion over `messages`.
    ///
    /// `tools` of `None` disables tool calling for the request entirely.
    async fn stream_completion(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
    ) -> Result<FragmentStream, ProviderError>;
}
