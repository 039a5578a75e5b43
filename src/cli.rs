//! Command-line interface definition and dispatch for hashi.
//!
//! Uses [`clap`] for argument parsing with derive macros. hashi takes a
//! single positional argument: the tool server script to launch.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::chat;
use crate::config::Config;

/// Top-level CLI structure for hashi.
#[derive(Parser)]
#[command(
    name = "hashi",
    version,
    about = "Chat with an LLM that can call tools from an MCP server"
)]
pub struct Cli {
    /// Path to the tool server script (.py or .js)
    pub server_script: Option<PathBuf>,

    /// Ask a single question, print the answer and exit
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Runs a one-shot query or the chat session, or prints usage and exits with
/// status 1 when no server script was given.
pub async fn run(cli: Cli) -> Result<()> {
    let Some(server_script) = cli.server_script else {
        eprintln!("Usage: hashi <path_to_server_script>");
        std::process::exit(1);
    };

    let config = Config::load()?;
    match cli.query {
        Some(query) => chat::run_query(config, &server_script, &query).await,
        None => chat::run_chat(config, &server_script).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_server_script_is_optional_positional() {
        let cli = Cli::try_parse_from(["hashi", "weather.py"]).unwrap();
        assert_eq!(cli.server_script, Some(PathBuf::from("weather.py")));

        let cli = Cli::try_parse_from(["hashi"]).unwrap();
        assert!(cli.server_script.is_none());
    }

    #[test]
    fn test_query_flag() {
        let cli = Cli::try_parse_from(["hashi", "weather.py", "-q", "weather in NYC?"]).unwrap();
        assert_eq!(cli.query.as_deref(), Some("weather in NYC?"));

        let cli = Cli::try_parse_from(["hashi", "--query", "hi", "server.js"]).unwrap();
        assert_eq!(cli.server_script, Some(PathBuf::from("server.js")));
        assert_eq!(cli.query.as_deref(), Some("hi"));
    }
}
