pub fn config_loaded(path: &str) -> String {
    format!("Loaded configuration from {path}")
}

pub const CONFIG_DEFAULTS: &str = "No config file found, using built-in defaults";

pub fn session_start(interpreter: &str, rewriter: &str, tools: &str) -> String {
    format!("Session started (interpreter agent: {interpreter}, rewriter agent: {rewriter}, allowed tools: [{tools}])")
}

pub const NO_TOOLS_ALLOWED: &str = "Allow-list is empty: every external tool request will be rejected";

pub fn request_received(text: &str) -> String {
    format!("Request received: {text:?}")
}

pub fn interpreted(summary: &str) -> String {
    format!("Interpreted as {summary}")
}

pub fn rejected(reason: &str) -> String {
    format!("Command rejected: {reason}")
}

pub fn overwrite_warning(filename: &str, before: usize, after: usize) -> String {
    format!("Overwriting '{filename}' without backup ({before} -> {after} bytes)")
}

pub const SHUTDOWN: &str = "Shutting down...";
