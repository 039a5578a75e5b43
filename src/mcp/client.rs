//! MCP client backed by an `rmcp` running service.

use std::path::Path;

use async_trait::async_trait;
use rmcp::model::CallToolRequestParams;
use rmcp::service::RunningService;
use rmcp::transport::TokioChildProcess;
use rmcp::{RoleClient, ServiceExt};
use tracing::{debug, info};

use super::command::ServerCommand;
use super::error::McpError;
use super::result::CallToolResult;
use crate::tools::{JsonObject, ToolDescriptor, ToolTransport};

/// Client side of one tool-server session.
///
/// The child process lives as long as the client and is killed with it.
pub struct McpClient {
    service: RunningService<RoleClient, ()>,
}

impl McpClient {
    /// Launches the server script and performs the handshake.
    pub async fn launch(script: &Path) -> Result<Self, McpError> {
        let command = ServerCommand::from_script(script)?;
        Self::spawn(&command).await
    }

    pub async fn spawn(command: &ServerCommand) -> Result<Self, McpError> {
        debug!(program = %command.program, args = ?command.args, "spawning tool server");
        let transport = TokioChildProcess::new(command.to_command()).map_err(McpError::Spawn)?;
        let service = ()
            .serve(transport)
            .await
            .map_err(|e| McpError::Initialize(e.to_string()))?;

        let client = Self { service };
        info!(server = client.server_name(), "tool server initialized");
        Ok(client)
    }

    /// Name the server reported during the handshake.
    pub fn server_name(&self) -> &str {
        self.service
            .peer_info()
            .map(|info| info.server_info.name.as_str())
            .unwrap_or("unknown")
    }
}

#[async_trait]
impl ToolTransport for McpClient {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, McpError> {
        let tools = self.service.list_all_tools().await?;
        Ok(tools.into_iter().map(ToolDescriptor::from).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .service
            .call_tool(CallToolRequestParams {
                name: name.to_string().into(),
                arguments: Some(arguments),
                meta: None,
                task: None,
            })
            .await?;
        Ok(result.into())
    }
}
