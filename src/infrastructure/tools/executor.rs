//! # Tool Executor
//!
//! Performs the host-side effects of a command: child processes with
//! captured output and plain filesystem operations. Processes are spawned
//! directly, never through a shell, and an arbitrary program can only be
//! started with an [`AllowedTool`].

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use crate::domain::allow_list::AllowedTool;
use crate::domain::errors::{CommandError, Result};
use crate::domain::types::command_line;

/// Captured result of a finished child process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Program and arguments as run, for display.
    pub command_line: String,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Executes processes and filesystem operations relative to a working directory.
#[derive(Debug, Clone, Default)]
pub struct ToolExecutor {
    /// `None` means the process working directory.
    workdir: Option<PathBuf>,
}

impl ToolExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    /// Resolves a user-supplied path exactly as given, against the working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        match &self.workdir {
            Some(dir) => dir.join(path),
            None => PathBuf::from(path),
        }
    }

    async fn spawn_captured(&self, program: &str, args: &[String]) -> Result<ProcessOutput> {
        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|source| CommandError::Process {
            program: program.to_string(),
            source,
        })?;

        let result = ProcessOutput {
            command_line: command_line(program, args),
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::info!("`{}` exited with {}", result.command_line, result.status);
        Ok(result)
    }

    /// Runs an allow-listed tool with its arguments passed verbatim.
    pub async fn run_tool(&self, tool: &AllowedTool, args: &[String]) -> Result<ProcessOutput> {
        self.spawn_captured(tool.name(), args).await
    }

    /// Host directory listing, long form when `detailed`.
    pub async fn list_files(&self, detailed: bool) -> Result<ProcessOutput> {
        let (program, args) = listing_command(detailed);
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.spawn_captured(program, &args).await
    }

    pub async fn read_file(&self, path: &str) -> Result<String> {
        let resolved = self.resolve(path);
        tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => CommandError::NotFound {
                    path: path.to_string(),
                },
                _ => CommandError::io("reading", path, source),
            })
    }

    /// Creates or truncates `path`. Parent directories are not created.
    pub async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        tokio::fs::write(self.resolve(path), content)
            .await
            .map_err(|source| CommandError::io("writing", path, source))
    }

    /// Creates `path` and any missing parents; an existing directory is fine.
    pub async fn create_dir_all(&self, path: &str) -> Result<()> {
        tokio::fs::create_dir_all(self.resolve(path))
            .await
            .map_err(|source| CommandError::io("creating directory", path, source))
    }
}

fn listing_command(detailed: bool) -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "windows") {
        if detailed {
            ("cmd", &["/C", "dir"])
        } else {
            ("cmd", &["/C", "dir", "/B"])
        }
    } else if detailed {
        ("ls", &["-l"])
    } else {
        ("ls", &["-a"])
    }
}
