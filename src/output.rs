//! Output rendering abstraction for hashi.
//!
//! Defines the [`Renderer`] trait that decouples a turn's streamed output
//! from the display layer. [`StdoutRenderer`] prints pieces to the terminal
//! as they arrive; [`BufferRenderer`] collects them for callers that want
//! the whole answer as one string.

use colored::Colorize;
use std::io::{self, Write};

/// Receives the events of one turn, in arrival order.
pub trait Renderer {
    /// Render a single text piece as it arrives.
    fn render_token(&mut self, token: &str);

    /// A tool is about to run with the given raw arguments text.
    fn tool_start(&mut self, _name: &str, _arguments: &str) {}

    /// A tool returned `result`, which is being fed back to the model.
    fn tool_result(&mut self, _name: &str, _result: &str) {}

    /// Called when the turn's output is complete.
    fn render_done(&mut self);

    /// Called when the turn fails.
    fn render_error(&mut self, err: &str);
}

/// Renders streaming output directly to stdout.
///
/// Each piece is printed immediately with an explicit flush so the user
/// sees a "typing" effect.
#[derive(Debug, Default)]
pub struct StdoutRenderer {
    piece_count: usize,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for StdoutRenderer {
    fn render_token(&mut self, token: &str) {
        print!("{}", token);
        io::stdout().flush().ok();
        self.piece_count += 1;
    }

    fn tool_start(&mut self, _name: &str, arguments: &str) {
        println!("{}", format!("  arguments: {}", arguments).dimmed());
    }

    fn tool_result(&mut self, _name: &str, result: &str) {
        println!("{}", format!("  result: {}", result).dimmed());
        println!();
    }

    fn render_done(&mut self) {
        if self.piece_count > 0 {
            println!();
        }
        println!();
    }

    fn render_error(&mut self, err: &str) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}

/// Collects text pieces in memory.
#[derive(Debug, Default)]
pub struct BufferRenderer {
    pieces: Vec<String>,
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn pieces(&self) -> &[String] {
        &self.pieces
    }

    /// All pieces joined in arrival order.
    pub fn text(&self) -> String {
        self.pieces.concat()
    }
}

impl Renderer for BufferRenderer {
    fn render_token(&mut self, token: &str) {
        self.pieces.push(token.to_string());
    }

    fn render_done(&mut self) {}

    fn render_error(&mut self, _err: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_renderer_keeps_order() {
        let mut renderer = BufferRenderer::new();
        renderer.render_token("a");
        renderer.tool_start("echo", "{}");
        renderer.render_token("b");
        renderer.render_done();
        assert_eq!(renderer.pieces(), ["a", "b"]);
        assert_eq!(renderer.text(), "ab");
    }
}
