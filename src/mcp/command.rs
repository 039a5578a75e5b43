use std::path::Path;

use tokio::process::Command;

use super::error::McpError;
use crate::constants::{NODE_COMMAND, PYTHON_COMMAND};

/// How to launch a tool server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ServerCommand {
    /// Picks the interpreter from the script extension: `.py` runs under
    /// python, `.js` under node. Anything else is rejected.
    pub fn from_script(path: &Path) -> Result<Self, McpError> {
        let program = match path.extension().and_then(|e| e.to_str()) {
            Some("py") => PYTHON_COMMAND,
            Some("js") => NODE_COMMAND,
            _ => return Err(McpError::UnsupportedScript(path.to_path_buf())),
        };
        Ok(Self {
            program: program.to_string(),
            args: vec![path.to_string_lossy().into_owned()],
        })
    }

    pub(super) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}
