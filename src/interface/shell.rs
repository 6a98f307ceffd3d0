//! # Interactive Shell
//!
//! Reads requests from stdin line by line. Each request runs on its own
//! worker task and the transcript comes back over a oneshot channel, so the
//! reader never executes a command itself.

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;

use crate::application::pipeline::Pipeline;
use crate::interface::cli;
use crate::strings::{help, messages};

#[derive(Debug, PartialEq, Eq)]
pub enum ShellInput {
    Empty,
    Help,
    Exit,
    Request(String),
}

impl ShellInput {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => ShellInput::Empty,
            ".help" => ShellInput::Help,
            ".exit" | ".quit" => ShellInput::Exit,
            text => ShellInput::Request(text.to_string()),
        }
    }
}

fn show_prompt() {
    print!("{}", help::SHELL_PROMPT);
    let _ = std::io::stdout().flush();
}

pub async fn run(pipeline: Arc<Pipeline>, dry_run: bool) -> Result<()> {
    println!("{}", help::SHELL_BANNER);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        show_prompt();
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let text = match ShellInput::parse(&line) {
            ShellInput::Empty => continue,
            ShellInput::Help => {
                println!("{}", help::SHELL_HELP);
                continue;
            }
            ShellInput::Exit => break,
            ShellInput::Request(text) => text,
        };

        println!(
            "[{}] {}\n",
            chrono::Local::now().format("%H:%M:%S"),
            messages::processing(&text)
        );

        let (tx, rx) = oneshot::channel();
        let worker = pipeline.clone();
        tokio::spawn(async move {
            let transcript = cli::respond(&worker, &text, dry_run).await;
            let _ = tx.send(transcript);
        });

        match rx.await {
            Ok(transcript) => println!("{}\n", transcript),
            Err(_) => {
                tracing::error!("Worker task ended without a transcript");
                eprintln!("{}", messages::failure_line("InternalError", "request worker stopped"));
            }
        }
    }

    Ok(())
}
