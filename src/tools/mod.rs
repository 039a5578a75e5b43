pub mod invoker;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::mcp::{CallToolResult, McpError};

pub use invoker::{ToolInvocationError, ToolInvoker};

/// Tool arguments as sent to the server: always a JSON object.
pub type JsonObject = serde_json::Map<String, Value>;

/// A tool advertised by the tool server.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    /// Unique name the LLM uses to call this tool.
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: String,
    /// JSON Schema describing the tool's input parameters.
    pub input_schema: Value,
}

impl From<rmcp::model::Tool> for ToolDescriptor {
    fn from(tool: rmcp::model::Tool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.as_deref().unwrap_or("").to_string(),
            input_schema: Value::Object((*tool.input_schema).clone()),
        }
    }
}

/// Definition sent to the LLM so it knows what tools are available.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionSchema,
}

#[derive(Debug, Clone, Serialize)]
struct FunctionSchema {
    name: String,
    description: String,
    parameters: Value,
}

impl ToolSchema {
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// The external side-channel that lists and runs tools.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// Capability discovery. Called once per session.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, McpError>;

    /// Runs one tool and waits for its result envelope.
    async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, McpError>;
}

/// The tools fetched at session start. Read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    /// Builds a catalog, keeping the first descriptor for any repeated name.
    pub fn new(descriptors: Vec<ToolDescriptor>) -> Self {
        let mut tools: Vec<ToolDescriptor> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if tools.iter().any(|t| t.name == descriptor.name) {
                warn!(tool = %descriptor.name, "duplicate tool name, keeping first");
                continue;
            }
            tools.push(descriptor);
        }
        Self { tools }
    }

    /// Asks the transport for its tools.
    pub async fn fetch(transport: &dyn ToolTransport) -> Result<Self, McpError> {
        let descriptors = transport.list_tools().await?;
        debug!(count = descriptors.len(), "fetched tool catalog");
        Ok(Self::new(descriptors))
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Produce definitions for the LLM (sent in the API request).
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|t| ToolSchema {
                kind: "function",
                function: FunctionSchema {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.input_schema.clone(),
                },
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
