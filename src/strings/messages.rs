//! # Messages
//!
//! Contains constant strings and format functions for user-facing transcript lines.

pub const SUCCESS_MARK: &str = "✅";
pub const FAILURE_MARK: &str = "❌";
pub const STEP_MARK: &str = "•";

pub const TASK_COMPLETED: &str = "✅ Task completed.";
pub const TASK_FAILED: &str = "⚠️ Task finished with errors.";
pub const NOTHING_EXECUTED: &str = "⛔ Nothing was executed.";
pub const NOT_UNDERSTOOD: &str = "🤖 Could not interpret the request.";

pub const STDOUT_HEADER: &str = "--- OUTPUT ---";
pub const STDERR_HEADER: &str = "--- ERRORS ---";

pub fn acknowledged(summary: &str) -> String {
    format!("🤖 Understood: {summary}")
}

pub fn failure_line(kind: &str, message: &str) -> String {
    format!("{FAILURE_MARK} {kind}: {message}")
}

pub fn processing(prompt: &str) -> String {
    format!("🤖 Processing: '{prompt}'")
}

pub fn executing(command_line: &str) -> String {
    format!("Executing: `{command_line}`")
}

pub fn exit_status(status: &str) -> String {
    format!("Process exited with {status}")
}

pub fn file_created(filename: &str, empty: bool) -> String {
    if empty {
        format!("Created empty file '{filename}'")
    } else {
        format!("Created file '{filename}' with content")
    }
}

pub fn directory_created(dirname: &str) -> String {
    format!("Created directory '{dirname}'")
}

pub fn refactor_started(filename: &str) -> String {
    format!("Attempting to refactor '{filename}'...")
}

pub fn original_read(bytes: usize) -> String {
    format!("Original code read successfully ({bytes} bytes).")
}

pub const REWRITE_RECEIVED: &str = "The rewrite backend returned the refactored code.";

pub fn refactor_done(filename: &str) -> String {
    format!("Refactored and overwrote '{filename}' (no backup kept).")
}

pub fn dry_run(summary: &str) -> String {
    format!("🔎 Dry run: would execute {summary}")
}

pub const DRY_RUN_NOTE: &str = "Nothing was executed (--dry-run).";
