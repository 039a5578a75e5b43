//! Entry point for hashi, a terminal chat client that lets an LLM call tools
//! served by an MCP server over stdio.
//!
//! This binary loads environment variables, sets up logging, parses CLI
//! arguments via [`cli`], and starts the chat session.

mod accumulator;
mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod conversation;
mod logging;
mod mcp;
mod message;
mod output;
mod provider;
#[cfg(test)]
mod testing;
mod tools;

use anyhow::Result;

/// Runs the hashi CLI.
///
/// Loads `.env` files (silently ignored if absent), installs the stderr
/// tracing subscriber, parses command-line arguments into a [`cli::Cli`]
/// struct, and runs it via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();
    let cli = cli::parse();
    cli::run(cli).await
}
