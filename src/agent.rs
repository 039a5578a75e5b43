//! One user turn, end to end.
//!
//! [`TurnOrchestrator::run_turn`] streams a first completion with the tool
//! catalog attached. If that pass ends with announced tool calls, the first
//! one is run through the [`ToolInvoker`], the exchange is recorded in the
//! conversation, and a second completion is streamed without tools. At most
//! one tool call is executed per turn.

use std::sync::Arc;

use futures::StreamExt;
use thiserror::Error;
use tracing::{debug, info};

use crate::accumulator::{AccumulatorError, DeltaAccumulator, Verdict};
use crate::conversation::ConversationState;
use crate::output::{BufferRenderer, Renderer};
use crate::provider::{CompletionProvider, FragmentStream, ProviderError};
use crate::tools::{ToolCatalog, ToolInvocationError, ToolInvoker, ToolSchema, ToolTransport};

/// How a successful turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model answered directly.
    Answered,
    /// A tool ran and the model answered from its result.
    ToolAnswered { tool: String },
    /// The model's arguments for `tool` were not valid JSON; nothing ran.
    ArgumentsRejected { tool: String },
}

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Tool(#[from] ToolInvocationError),

    #[error("malformed tool-call stream: {0}")]
    ToolCallStream(#[from] AccumulatorError),
}

pub struct TurnOrchestrator {
    provider: Box<dyn CompletionProvider>,
    invoker: ToolInvoker,
    schemas: Vec<ToolSchema>,
    conversation: ConversationState,
}

impl TurnOrchestrator {
    pub fn new(
        provider: Box<dyn CompletionProvider>,
        transport: Arc<dyn ToolTransport>,
        catalog: &ToolCatalog,
        conversation: ConversationState,
    ) -> Self {
        Self {
            provider,
            invoker: ToolInvoker::new(transport),
            schemas: catalog.schemas(),
            conversation,
        }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    #[cfg(test)]
    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Runs one turn and returns the concatenated text it produced.
    pub async fn process_query(&mut self, query: &str) -> Result<String, TurnError> {
        let mut buffer = BufferRenderer::new();
        self.run_turn(query, &mut buffer).await?;
        Ok(buffer.text())
    }

    /// Runs one turn, forwarding every text piece to `renderer` as it arrives.
    ///
    /// The user message stays in the conversation even if the turn fails.
    /// The tool exchange is recorded only once the tool has answered.
    pub async fn run_turn(
        &mut self,
        query: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<TurnOutcome, TurnError> {
        self.conversation.push_user(query);

        let tools = (!self.schemas.is_empty()).then_some(self.schemas.as_slice());
        let stream = self
            .provider
            .stream_completion(self.conversation.messages(), tools)
            .await?;

        let calls = match first_pass(stream, renderer).await? {
            Verdict::NoToolCall => {
                renderer.render_done();
                return Ok(TurnOutcome::Answered);
            }
            Verdict::ToolCallsReady(calls) => calls,
        };
        if calls.len() > 1 {
            debug!(ignored = calls.len() - 1, "running only the first tool call");
        }
        let Some(call) = calls.into_iter().next() else {
            renderer.render_done();
            return Ok(TurnOutcome::Answered);
        };

        let arguments = match ToolInvoker::parse_arguments(&call.arguments) {
            Ok(arguments) => arguments,
            Err(_) => {
                info!(tool = %call.name, "tool arguments are not valid JSON");
                renderer.render_token(&format!(
                    "\n\n[Tool argument parse error: {}]",
                    call.arguments
                ));
                renderer.render_done();
                return Ok(TurnOutcome::ArgumentsRejected { tool: call.name });
            }
        };

        renderer.render_token(&format!("\n\n[Calling tool {}]\n\n", call.name));
        renderer.tool_start(&call.name, &call.arguments);
        let result = self.invoker.call(&call.name, arguments).await?;
        renderer.tool_result(&call.name, &result);

        let tool = call.name.clone();
        self.conversation.record_tool_exchange(call.into(), result);

        let stream = self
            .provider
            .stream_completion(self.conversation.messages(), None)
            .await?;
        follow_up_pass(stream, renderer).await?;
        renderer.render_done();

        Ok(TurnOutcome::ToolAnswered { tool })
    }
}

/// Streams the tool-enabled pass through a fresh accumulator.
async fn first_pass(
    mut stream: FragmentStream,
    renderer: &mut dyn Renderer,
) -> Result<Verdict, TurnError> {
    let mut accumulator = DeltaAccumulator::new();
    while let Some(fragment) = stream.next().await {
        if let Some(text) = accumulator.push(fragment?)? {
            renderer.render_token(&text);
        }
    }
    Ok(accumulator.finish())
}

/// Streams the post-tool answer. Tool calls are not acted on here.
async fn follow_up_pass(
    mut stream: FragmentStream,
    renderer: &mut dyn Renderer,
) -> Result<(), TurnError> {
    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        if !fragment.tool_calls.is_empty() {
            debug!("ignoring tool-call delta in follow-up stream");
            continue;
        }
        if let Some(text) = fragment.content.filter(|t| !t.is_empty()) {
            renderer.render_token(&text);
        }
    }
    Ok(())
}
