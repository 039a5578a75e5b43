//! Interactive chat REPL for hashi.
//!
//! Launches the tool server, fetches its tool catalog once, then reads user
//! queries with [`rustyline`] and runs each as one turn of the
//! [`TurnOrchestrator`]. The whole conversation is sent with every request so
//! the LLM keeps context across turns.

use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::agent::TurnOrchestrator;
use crate::config::Config;
use crate::constants::{HISTORY_FILENAME, QUIT_COMMAND};
use crate::conversation::ConversationState;
use crate::mcp::McpClient;
use crate::output::{Renderer, StdoutRenderer};
use crate::provider::{resolve_model, OpenAiClient};
use crate::tools::ToolCatalog;

/// A connected tool server and the orchestrator that drives turns against it.
struct Session {
    orchestrator: TurnOrchestrator,
    tool_names: Vec<String>,
}

/// Resolves the provider, launches the tool server and fetches its catalog.
async fn start_session(config: &Config, server_script: &Path) -> Result<Session> {
    let selection = resolve_model(config)?;
    let provider = OpenAiClient::from_config(config, &selection)?;

    let client = McpClient::launch(server_script)
        .await
        .with_context(|| format!("Failed to start tool server {}", server_script.display()))?;
    let client = Arc::new(client);
    let catalog = ToolCatalog::fetch(&*client)
        .await
        .context("Failed to list tools")?;
    info!(
        server = client.server_name(),
        tools = catalog.len(),
        "connected to tool server"
    );

    let conversation = ConversationState::with_system_prompt(config.system_prompt.as_deref());
    Ok(Session {
        tool_names: catalog.names().into_iter().map(String::from).collect(),
        orchestrator: TurnOrchestrator::new(Box::new(provider), client, &catalog, conversation),
    })
}

/// Runs a single query and prints the complete answer.
pub async fn run_query(config: Config, server_script: &Path, query: &str) -> Result<()> {
    let mut session = start_session(&config, server_script).await?;
    let answer = session.orchestrator.process_query(query).await?;
    println!("{}", answer);
    Ok(())
}

/// Runs the interactive chat REPL against the tool server at `server_script`.
///
/// # Readline behavior
///
/// - **`quit`**: exits (case-insensitive)
/// - **Ctrl+C**: at the prompt, clears the line; during a turn, cancels it
/// - **Ctrl+D**: exits cleanly with "goodbye."
/// - Readline history is persisted to `~/.cache/hashi/chat_history.txt`
///
/// A failed turn is reported and the loop continues.
pub async fn run_chat(config: Config, server_script: &Path) -> Result<()> {
    let Session {
        mut orchestrator,
        tool_names,
    } = start_session(&config, server_script).await?;

    println!(
        "{} [model: {}] [tools: {}]",
        "hashi".bold().cyan(),
        orchestrator.model().yellow(),
        tool_names.join(", ").yellow(),
    );
    println!(
        "{}",
        format!("Type a query, or '{}' to exit.", QUIT_COMMAND).dimmed()
    );
    println!();

    let mut rl = DefaultEditor::new()?;
    let history_path = Config::cache_dir()?.join(HISTORY_FILENAME);
    if history_path.exists() {
        let _ = rl.load_history(&history_path);
    }

    loop {
        let readline = rl.readline(&format!("{} ", ">".green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case(QUIT_COMMAND) {
                    break;
                }
                let _ = rl.add_history_entry(&line);
                println!();

                let mut renderer = StdoutRenderer::new();
                let turn = tokio::select! {
                    result = orchestrator.run_turn(&line, &mut renderer) => Some(result),
                    _ = tokio::signal::ctrl_c() => None,
                };

                match turn {
                    Some(Ok(outcome)) => debug!(?outcome, "turn finished"),
                    Some(Err(e)) => renderer.render_error(&e.to_string()),
                    None => {
                        println!();
                        println!("{}", "turn cancelled.".dimmed());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "goodbye.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}
