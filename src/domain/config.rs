//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for backend agents, the pipeline wiring, the tool allow-list and logging.
//! Every section is optional; a missing file yields the built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::allow_list::AllowList;
use crate::domain::paths;

/// Main application configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_agents")]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agents: default_agents(),
            pipeline: PipelineConfig::default(),
            commands: CommandsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config.yaml")
    }

    /// Loads `explicit` if given (it must exist), otherwise the first existing
    /// default location, otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => paths::config_candidates().into_iter().find(|p| p.is_file()),
        };

        match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config = Self::from_yaml(&content)?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Immutable allow-list built once from `commands.allowed`.
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.commands.allowed.iter().cloned())
    }
}

pub type AgentsConfig = HashMap<String, AgentConfig>;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AgentConfig {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>, // e.g. "GEMINI_API_KEY"
    /// Transport timeout in seconds; unset means wait for the backend.
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_agents() -> AgentsConfig {
    let mut agents = HashMap::new();
    agents.insert(
        DEFAULT_AGENT.to_string(),
        AgentConfig {
            provider: "gemini".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: Some("GEMINI_API_KEY".to_string()),
            ..Default::default()
        },
    );
    agents
}

const DEFAULT_AGENT: &str = "gemini";

/// Which agent serves each backend call.
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    #[serde(default = "default_agent_name")]
    pub interpreter: String,
    #[serde(default = "default_agent_name")]
    pub rewriter: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            interpreter: default_agent_name(),
            rewriter: default_agent_name(),
        }
    }
}

fn default_agent_name() -> String {
    DEFAULT_AGENT.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommandsConfig {
    #[serde(default = "default_allowed")]
    pub allowed: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            allowed: default_allowed(),
        }
    }
}

fn default_allowed() -> Vec<String> {
    vec!["git".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
