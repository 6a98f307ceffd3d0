//! # Intent Schema
//!
//! The closed set of intents the shell understands, with the wire keys each
//! one carries. The same table drives the interpreter prompt and the
//! validator's required-field checks, so adding an intent means touching
//! this file, the validator and the executor together.

use std::fmt;

/// A recognised category of user request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    ListFiles,
    CreateFile,
    CreateDirectory,
    RefactorCode,
    ExternalTool,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::ListFiles,
        Intent::CreateFile,
        Intent::CreateDirectory,
        Intent::RefactorCode,
        Intent::ExternalTool,
    ];

    /// Wire name used in the `intent` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ListFiles => "list_files",
            Intent::CreateFile => "create_file",
            Intent::CreateDirectory => "create_directory",
            Intent::RefactorCode => "refactor_code",
            Intent::ExternalTool => "external_tool",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Intent::ALL.into_iter().find(|intent| intent.as_str() == s)
    }

    pub fn spec(&self) -> &'static IntentSpec {
        match self {
            Intent::ListFiles => &LIST_FILES,
            Intent::CreateFile => &CREATE_FILE,
            Intent::CreateDirectory => &CREATE_DIRECTORY,
            Intent::RefactorCode => &REFACTOR_CODE,
            Intent::ExternalTool => &EXTERNAL_TOOL,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single key in an intent's JSON shape.
#[derive(Debug)]
pub struct FieldSpec {
    pub key: &'static str,
    pub required: bool,
    pub hint: &'static str,
}

/// Shape of one intent plus the guidance sent to the interpretation backend.
#[derive(Debug)]
pub struct IntentSpec {
    pub rule: &'static str,
    pub shape: &'static str,
    pub fields: &'static [FieldSpec],
    pub example_prompt: &'static str,
    pub example_json: &'static str,
}

impl IntentSpec {
    #[cfg(test)]
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.key)
    }
}

/// Every top-level key the backend may emit.
pub const WIRE_KEYS: [&str; 8] = [
    "intent", "detail", "dirname", "filename", "content", "command", "args", "error",
];

static LIST_FILES: IntentSpec = IntentSpec {
    rule: "For file/directory listing",
    shape: r#"{"intent": "list_files", "detail": true/false}"#,
    fields: &[FieldSpec {
        key: "detail",
        required: false,
        hint: "true for a long listing with permissions, sizes and dates",
    }],
    example_prompt: "list all files",
    example_json: r#"{"intent": "list_files", "detail": false}"#,
};

static CREATE_FILE: IntentSpec = IntentSpec {
    rule: "For file creation (generate the code when the user describes a concept)",
    shape: r#"{"intent": "create_file", "filename": "file.ext", "content": "text to write"}"#,
    fields: &[
        FieldSpec {
            key: "filename",
            required: true,
            hint: "path of the file to create or overwrite",
        },
        FieldSpec {
            key: "content",
            required: false,
            hint: "full file content, empty for an empty file",
        },
    ],
    example_prompt: "create a prime number checker in prime.py",
    example_json: r#"{"intent": "create_file", "filename": "prime.py", "content": "def is_prime(n): ..."}"#,
};

static CREATE_DIRECTORY: IntentSpec = IntentSpec {
    rule: "For directory creation",
    shape: r#"{"intent": "create_directory", "dirname": "the_dir_name"}"#,
    fields: &[FieldSpec {
        key: "dirname",
        required: true,
        hint: "directory path, intermediate directories are created too",
    }],
    example_prompt: "make a folder called build/out",
    example_json: r#"{"intent": "create_directory", "dirname": "build/out"}"#,
};

static REFACTOR_CODE: IntentSpec = IntentSpec {
    rule: "For refactoring existing code",
    shape: r#"{"intent": "refactor_code", "filename": "file_to_refactor.py"}"#,
    fields: &[FieldSpec {
        key: "filename",
        required: true,
        hint: "existing file whose content will be rewritten in place",
    }],
    example_prompt: "refactor the script named utils.py",
    example_json: r#"{"intent": "refactor_code", "filename": "utils.py"}"#,
};

static EXTERNAL_TOOL: IntentSpec = IntentSpec {
    rule: "For commands of an allowed external tool",
    shape: r#"{"command": "tool", "args": ["..."]}"#,
    fields: &[
        FieldSpec {
            key: "command",
            required: true,
            hint: "tool name, must be one of the allowed tools",
        },
        FieldSpec {
            key: "args",
            required: false,
            hint: "arguments passed verbatim, one string per argument",
        },
    ],
    example_prompt: "commit my changes",
    example_json: r#"{"command": "git", "args": ["commit", "-m", "AI generated commit"]}"#,
};

/// Shape returned by the backend when it refuses a request.
pub const REFUSAL_SHAPE: &str = r#"{"error": "Command not supported."}"#;

/// Numbered rule list describing every intent shape.
pub fn describe() -> String {
    let mut out = String::new();
    for (idx, intent) in Intent::ALL.iter().enumerate() {
        let spec = intent.spec();
        out.push_str(&format!("{}. {}, return: {}\n", idx + 1, spec.rule, spec.shape));
        for field in spec.fields {
            let presence = if field.required { "required" } else { "optional" };
            out.push_str(&format!("   - `{}` ({}): {}\n", field.key, presence, field.hint));
        }
    }
    out.push_str(&format!(
        "{}. If a command is not supported or unsafe, return: {}\n",
        Intent::ALL.len() + 1,
        REFUSAL_SHAPE
    ));
    out
}

/// One `- User: "..." -> {...}` line per intent.
pub fn examples() -> String {
    Intent::ALL
        .iter()
        .map(|intent| {
            let spec = intent.spec();
            format!("- User: \"{}\" -> {}", spec.example_prompt, spec.example_json)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
