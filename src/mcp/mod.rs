//! Model Context Protocol client over child-process stdio.
//!
//! A tool server is launched as a subprocess and driven through [`rmcp`].
//! hashi needs three things from it: the `initialize` handshake, one
//! `tools/list` at session start, and `tools/call` for each dispatched tool
//! call.

mod client;
mod command;
mod error;
mod result;

pub use client::McpClient;
pub use error::McpError;
pub use result::{CallToolResult, ContentItem};
