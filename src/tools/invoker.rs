//! Single tool invocation through the [`ToolTransport`].

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::{JsonObject, ToolTransport};
use crate::mcp::ContentItem;

/// Why a tool invocation produced no usable result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolInvocationError {
    /// The model's arguments text is not a JSON object. Carries the raw text.
    #[error("tool arguments are not a JSON object: {0}")]
    ArgumentParse(String),

    /// The tool answered with zero content items. Carries the tool name.
    #[error("tool `{0}` returned no content")]
    EmptyToolResult(String),

    /// The tool server could not be reached or broke protocol.
    #[error("tool transport failed: {0}")]
    Transport(String),
}

/// Runs tools through the transport, one request and response at a time.
///
/// Imposes no timeout; callers that need one wrap the future.
#[derive(Clone)]
pub struct ToolInvoker {
    transport: Arc<dyn ToolTransport>,
}

impl ToolInvoker {
    pub fn new(transport: Arc<dyn ToolTransport>) -> Self {
        Self { transport }
    }

    /// Parses the model's arguments text into a JSON object.
    ///
    /// Valid JSON that is not an object (`42`, `[]`, `null`) is rejected too,
    /// since tool arguments are always named.
    pub fn parse_arguments(arguments: &str) -> Result<JsonObject, ToolInvocationError> {
        match serde_json::from_str(arguments) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(ToolInvocationError::ArgumentParse(arguments.to_string())),
        }
    }

    /// Calls the tool with already-parsed arguments and extracts the text of
    /// the first content item.
    pub async fn call(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<String, ToolInvocationError> {
        debug!(tool = name, "invoking tool");
        let result = self
            .transport
            .call_tool(name, arguments)
            .await
            .map_err(|e| ToolInvocationError::Transport(e.to_string()))?;

        if result.is_error {
            warn!(tool = name, "tool reported an error; passing it to the model");
        }

        match result.content.into_iter().next() {
            Some(ContentItem::Text { text }) => Ok(text),
            Some(ContentItem::Unsupported) => Err(ToolInvocationError::Transport(format!(
                "first content item from `{name}` is not text"
            ))),
            None => Err(ToolInvocationError::EmptyToolResult(name.to_string())),
        }
    }
}
