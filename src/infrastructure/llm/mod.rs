//! # LLM Backends
//!
//! Unified interface over the language-model providers (Gemini and the
//! OpenAI-compatible family) used for command interpretation and code
//! rewriting.
//!
//! ```rust,ignore
//! let client = Client::new(app_config);
//! let context = Context::new()
//!     .add_system_message("Return JSON only.")
//!     .add_user_message("list all files");
//! let response = client.chat("gemini", context).await?;
//! println!("{}", response.content);
//! ```

mod client;
pub mod providers;
mod types;

pub use client::Client;

pub use types::{Context, Error, MessageRole, Provider, Response, TokenUsage};
