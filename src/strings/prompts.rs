//! # Prompts
//!
//! Templates sent to the language-model backends and the renderer that fills them.

use crate::domain::schema;

/// A builder for rendering prompts with context.
pub struct PromptRenderer<'a> {
    template: &'a str,
    replacements: Vec<(&'a str, String)>,
}

impl<'a> PromptRenderer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            replacements: Vec::new(),
        }
    }

    pub fn set(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.replacements.push((key, value.into()));
        self
    }

    /// Single pass over the template; inserted values are never re-scanned.
    pub fn render(self) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let tail = &rest[start..];
            match self.replacements.iter().find(|(key, _)| tail.starts_with(key)) {
                Some((key, value)) => {
                    result.push_str(value);
                    rest = &tail[key.len()..];
                }
                None => {
                    if let Some(end) = tail.find("}}") {
                        tracing::error!(
                            "[PROMPT RENDER ERROR] Unreplaced placeholder found in output: {}",
                            &tail[..end + 2]
                        );
                    }
                    result.push_str("{{");
                    rest = &tail[2..];
                }
            }
        }
        result.push_str(rest);
        result
    }
}

pub const INTERPRETER_TEMPLATE: &str = include_str!("../../prompts/interpreter.md");
pub const REFACTOR_TEMPLATE: &str = include_str!("../../prompts/refactor.md");

/// System instruction for turning free text into one JSON command.
pub fn interpreter_prompt<'a>(allowed_tools: impl Iterator<Item = &'a str>) -> String {
    let tools: Vec<&str> = allowed_tools.collect();
    let tools = if tools.is_empty() {
        "(none)".to_string()
    } else {
        tools.join(", ")
    };

    PromptRenderer::new(INTERPRETER_TEMPLATE)
        .set("{{SCHEMA}}", schema::describe())
        .set("{{EXAMPLES}}", schema::examples())
        .set("{{ALLOWED_TOOLS}}", tools)
        .render()
}

/// Rewrite request carrying the full original source.
pub fn refactor_prompt(filename: &str, source: &str) -> String {
    PromptRenderer::new(REFACTOR_TEMPLATE)
        .set("{{FILENAME}}", filename)
        .set("{{LANGUAGE}}", fence_language(filename))
        .set("{{SOURCE}}", source)
        .render()
}

/// Code-fence language tag for a file, from its extension.
pub fn fence_language(filename: &str) -> &'static str {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("py") => "python",
        Some("rs") => "rust",
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("ts") => "typescript",
        Some("go") => "go",
        Some("java") => "java",
        Some("c" | "h") => "c",
        Some("cpp" | "cc" | "hpp") => "cpp",
        Some("sh" | "bash") => "bash",
        _ => "",
    }
}
