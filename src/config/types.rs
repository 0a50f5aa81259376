//! Configuration data model.
//!
//! This module holds struct/enum definitions only. Parsing lives in
//! `config::flags` and precedence/validation in `config::resolve` so the
//! merge behavior stays centralized.

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

use super::defaults::{
    DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENAI_MODEL, ENV_ANTHROPIC_API_KEY, ENV_ANTHROPIC_BASE_URL,
    ENV_OPENAI_API_KEY, ENV_OPENAI_BASE_URL,
};

/// Supported LLM provider integrations, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    /// Parse a provider name, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(ConfigError::UnsupportedProvider(value.to_string())),
        }
    }

    /// Canonical lowercase provider name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Built-in model id used when neither flag nor environment picks one.
    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => DEFAULT_OPENAI_MODEL,
            Self::Anthropic => DEFAULT_ANTHROPIC_MODEL,
        }
    }

    /// Provider-specific API key environment variable.
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => ENV_OPENAI_API_KEY,
            Self::Anthropic => ENV_ANTHROPIC_API_KEY,
        }
    }

    /// Provider-specific base URL environment variable.
    pub fn base_url_env(self) -> &'static str {
        match self {
            Self::OpenAi => ENV_OPENAI_BASE_URL,
            Self::Anthropic => ENV_ANTHROPIC_BASE_URL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw flag set produced by the argument parser.
///
/// Every field is optional; `None` means "not specified on the command line"
/// and lets the resolver fall through to environment or default values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliFlags {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub workspace: Option<String>,
    pub zypher_home: Option<String>,
    pub user_id: Option<String>,
    pub api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub image_api_key: Option<String>,
    pub disable_checkpoints: Option<bool>,
    pub auto_approve_tools: Option<bool>,
    pub max_iterations: Option<u64>,
    pub max_tokens: Option<u64>,
    pub task_timeout_ms: Option<u64>,
    pub show_help: bool,
}

/// Fully resolved, immutable settings driving one interactive session.
///
/// Constructed once by [`super::build_runtime_config`] and owned read-only by
/// the session loop and its collaborators for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    /// Absolute path the agent operates in.
    pub workspace: PathBuf,
    pub base_url: Option<String>,
    /// Absolute override for the agent home directory.
    pub zypher_home: Option<PathBuf>,
    pub user_id: Option<String>,
    pub image_api_key: Option<String>,
    pub disable_checkpoints: bool,
    pub auto_approve_tools: bool,
    pub max_iterations: Option<u64>,
    pub max_tokens: Option<u64>,
    pub task_timeout_ms: Option<u64>,
}
