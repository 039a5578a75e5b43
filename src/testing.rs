//! Scripted stand-ins for the provider and the tool server, shared by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;

use crate::mcp::{CallToolResult, McpError};
use crate::message::Message;
use crate::provider::{CompletionProvider, Fragment, FragmentStream, ProviderError};
use crate::tools::{JsonObject, ToolDescriptor, ToolSchema, ToolTransport};

/// One captured `stream_completion` call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    /// Tool names offered, or `None` when tools were omitted.
    pub tools: Option<Vec<String>>,
}

type Script = Result<Vec<Result<Fragment, ProviderError>>, ProviderError>;

/// Replays queued fragment sequences, one per request.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_stream(self, fragments: Vec<Fragment>) -> Self {
        self.push(Ok(fragments.into_iter().map(Ok).collect()))
    }

    pub fn then_items(self, items: Vec<Result<Fragment, ProviderError>>) -> Self {
        self.push(Ok(items))
    }

    pub fn then_fail(self, err: ProviderError) -> Self {
        self.push(Err(err))
    }

    fn push(self, script: Script) -> Self {
        self.scripts.lock().unwrap().push_back(script);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn stream_completion(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
    ) -> Result<FragmentStream, ProviderError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            tools: tools.map(|t| t.iter().map(|s| s.name().to_string()).collect()),
        });
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Stream("no scripted response left".into())));
        Ok(futures::stream::iter(script?).boxed())
    }
}

/// Tool server double that records every call it receives.
#[derive(Default)]
pub struct MockToolServer {
    tools: Vec<ToolDescriptor>,
    results: Mutex<VecDeque<Result<CallToolResult, McpError>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockToolServer {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self {
            tools,
            ..Default::default()
        }
    }

    pub fn then_result(self, result: Result<CallToolResult, McpError>) -> Self {
        self.results.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolTransport for MockToolServer {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, McpError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, McpError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), Value::Object(arguments)));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(McpError::Closed))
    }
}

pub fn descriptor(name: &str, description: &str) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::json!({"type": "object", "properties": {}}),
    }
}
