//! # Command Line
//!
//! Argument parsing and the one-shot mode: run a single request and print its transcript.

use clap::Parser;
use std::path::PathBuf;

use crate::application::pipeline::Pipeline;
use crate::strings::messages;

/// Turn plain-language requests into file, directory, refactor and tool commands.
#[derive(Parser, Debug)]
#[command(name = "intent-shell", version, about)]
pub struct Args {
    /// Request in plain language; omit to start the interactive shell
    pub prompt: Vec<String>,

    /// Path to config.yaml (defaults: ./config.yaml, then the user config dir)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Interpret and validate only, never execute
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Prompt words joined with spaces, `None` when empty.
    pub fn prompt_text(&self) -> Option<String> {
        let text = self.prompt.join(" ");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Transcript for one request, honoring `--dry-run`.
pub async fn respond(pipeline: &Pipeline, text: &str, dry_run: bool) -> String {
    if dry_run {
        pipeline.preview(text).await
    } else {
        pipeline.process(text).await
    }
}

pub async fn run_once(pipeline: &Pipeline, text: &str, dry_run: bool) -> String {
    let transcript = respond(pipeline, text, dry_run).await;
    format!("{}\n---\n{}", messages::processing(text), transcript)
}
